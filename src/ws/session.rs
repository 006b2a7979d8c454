use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::ws::ChatMessage;

/// Sending side of one chat socket
#[derive(Clone)]
pub struct ClientHandle {
    pub conn_id: String,
    pub user_id: String,
    pub room_id: String,
    pub username: String,
    pub sender: mpsc::UnboundedSender<ChatMessage>,
}

impl ClientHandle {
    pub fn new(
        conn_id: String,
        user_id: String,
        room_id: String,
        username: String,
        sender: mpsc::UnboundedSender<ChatMessage>,
    ) -> Self {
        Self {
            conn_id,
            user_id,
            room_id,
            username,
            sender,
        }
    }

    pub fn send(&self, msg: ChatMessage) -> Result<(), mpsc::error::SendError<ChatMessage>> {
        self.sender.send(msg)
    }
}

/// Open sockets of a single room
#[derive(Default)]
pub struct RoomConnections {
    clients: DashMap<String, ClientHandle>, // conn_id -> ClientHandle
}

impl RoomConnections {
    pub fn add_client(&self, handle: ClientHandle) {
        self.clients.insert(handle.conn_id.clone(), handle);
    }

    pub fn remove_client(&self, conn_id: &str) -> Option<ClientHandle> {
        self.clients.remove(conn_id).map(|(_, v)| v)
    }

    /// Send to every socket in the room. Closed sockets are skipped.
    pub fn broadcast(&self, msg: &ChatMessage) {
        for client in self.clients.iter() {
            if client.send(msg.clone()).is_err() {
                tracing::trace!(conn_id = %client.conn_id, "Dropping message for closed socket");
            }
        }
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// All open chat sockets, grouped by room
#[derive(Default)]
pub struct ConnectionsManager {
    rooms: DashMap<String, Arc<RoomConnections>>, // room_id -> RoomConnections
}

impl ConnectionsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a socket in its room. The insert happens under the entry
    /// lock so a concurrent empty-room cleanup cannot orphan it.
    pub fn join_room(&self, handle: ClientHandle) {
        self.rooms
            .entry(handle.room_id.clone())
            .or_default()
            .add_client(handle);
    }

    pub fn remove_client_from_room(&self, room_id: &str, conn_id: &str) -> Option<ClientHandle> {
        let handle = self.rooms.get(room_id)?.remove_client(conn_id);
        self.rooms.remove_if(room_id, |_, room| room.is_empty());
        handle
    }

    pub fn broadcast_to_room(&self, room_id: &str, msg: &ChatMessage) {
        if let Some(room) = self.rooms.get(room_id) {
            room.broadcast(msg);
        }
    }

    /// Number of open sockets in a room.
    pub fn connection_count(&self, room_id: &str) -> usize {
        self.rooms
            .get(room_id)
            .map(|room| room.client_count())
            .unwrap_or(0)
    }
}
