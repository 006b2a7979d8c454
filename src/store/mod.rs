//! Room persistence.
//!
//! Handlers only see [`RoomStore`]; the server picks the Redis-backed
//! [`RoomRepository`](crate::redis::RoomRepository) or the in-process
//! [`MemoryRoomStore`] at startup.

pub mod memory;

pub use memory::MemoryRoomStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Room;

/// A user currently inside a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: String,
    pub username: String,
}

#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn create_room(&self, room: &Room) -> Result<()>;

    async fn get_room(&self, room_id: &str) -> Result<Option<Room>>;

    /// All rooms, most recently created first.
    async fn list_rooms(&self) -> Result<Vec<Room>>;

    /// Remove the room and its member list.
    async fn delete_room(&self, room_id: &str) -> Result<()>;

    /// Add a member unless the room already holds `max_users`.
    /// Returns `false` when the room was full.
    async fn add_member_if_space(
        &self,
        room_id: &str,
        member: &Member,
        max_users: u32,
    ) -> Result<bool>;

    /// Remove a member, returning the nickname they used.
    async fn remove_member(&self, room_id: &str, user_id: &str) -> Result<Option<String>>;

    async fn get_members(&self, room_id: &str) -> Result<Vec<Member>>;

    async fn get_member_count(&self, room_id: &str) -> Result<usize>;

    async fn health_check(&self) -> Result<bool>;
}
