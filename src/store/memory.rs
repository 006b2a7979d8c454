use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{Member, RoomStore};
use crate::error::Result;
use crate::models::Room;

struct RoomEntry {
    seq: u64,
    room: Room,
    members: Vec<Member>,
}

/// In-process room store. Rooms live until deleted or the process exits.
#[derive(Default)]
pub struct MemoryRoomStore {
    rooms: DashMap<String, RoomEntry>,
    next_seq: AtomicU64,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn create_room(&self, room: &Room) -> Result<()> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.rooms.insert(
            room.room_id.clone(),
            RoomEntry {
                seq,
                room: room.clone(),
                members: Vec::new(),
            },
        );
        tracing::info!(room_id = %room.room_id, "Room stored in memory");
        Ok(())
    }

    async fn get_room(&self, room_id: &str) -> Result<Option<Room>> {
        Ok(self.rooms.get(room_id).map(|entry| entry.room.clone()))
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut rooms: Vec<(u64, Room)> = self
            .rooms
            .iter()
            .map(|entry| (entry.seq, entry.room.clone()))
            .collect();
        rooms.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rooms.into_iter().map(|(_, room)| room).collect())
    }

    async fn delete_room(&self, room_id: &str) -> Result<()> {
        self.rooms.remove(room_id);
        tracing::info!(room_id = %room_id, "Room deleted");
        Ok(())
    }

    async fn add_member_if_space(
        &self,
        room_id: &str,
        member: &Member,
        max_users: u32,
    ) -> Result<bool> {
        // The shard lock makes the count check and insert atomic.
        let Some(mut entry) = self.rooms.get_mut(room_id) else {
            return Ok(false);
        };
        if entry.members.len() >= max_users as usize {
            return Ok(false);
        }
        entry.members.push(member.clone());
        tracing::debug!(room_id = %room_id, user_id = %member.user_id, "Member added");
        Ok(true)
    }

    async fn remove_member(&self, room_id: &str, user_id: &str) -> Result<Option<String>> {
        let Some(mut entry) = self.rooms.get_mut(room_id) else {
            return Ok(None);
        };
        let position = entry.members.iter().position(|m| m.user_id == user_id);
        Ok(position.map(|idx| entry.members.remove(idx).username))
    }

    async fn get_members(&self, room_id: &str) -> Result<Vec<Member>> {
        Ok(self
            .rooms
            .get(room_id)
            .map(|entry| entry.members.clone())
            .unwrap_or_default())
    }

    async fn get_member_count(&self, room_id: &str) -> Result<usize> {
        Ok(self
            .rooms
            .get(room_id)
            .map(|entry| entry.members.len())
            .unwrap_or(0))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
