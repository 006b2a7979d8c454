//! Chat socket behaviour against a live in-memory server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use chat_lobby::api::create_router;
use chat_lobby::config::Config;
use chat_lobby::error::Result;
use chat_lobby::models::{ChatType, Room};
use chat_lobby::state::AppState;
use chat_lobby::store::{Member, MemoryRoomStore, RoomStore};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server(store: Arc<dyn RoomStore>) -> String {
    let app = create_router(AppState::new(Config::default(), store));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("ws://{addr}")
}

async fn new_room(store: &dyn RoomStore, max_user_cnt: u32) -> String {
    let room = Room::new(
        "chat".to_string(),
        String::new(),
        String::new(),
        ChatType::Message,
        max_user_cnt,
        false,
    );
    store.create_room(&room).await.unwrap();
    room.room_id
}

async fn join(base: &str, room_id: &str, username: &str) -> Socket {
    let url = format!("{base}/ws/chat?roomId={room_id}&username={username}");
    let (socket, _) = connect_async(url).await.expect("socket should open");
    socket
}

/// Next chat frame as JSON, skipping control frames.
async fn next_chat(socket: &mut Socket) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("timed out waiting for a chat frame")
            .expect("socket closed")
            .expect("socket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn test_chat_room_lifecycle() {
    let store = Arc::new(MemoryRoomStore::new());
    let base = spawn_server(store.clone()).await;
    let room_id = new_room(store.as_ref(), 2).await;

    let mut first = join(&base, &room_id, "alice").await;
    let entered = next_chat(&mut first).await;
    assert_eq!(entered["type"], "ENTER");
    assert_eq!(entered["roomId"], room_id.as_str());
    assert_eq!(entered["message"], "alice has entered.");

    let mut second = join(&base, &room_id, "alice").await;
    let own_entry = next_chat(&mut second).await;
    let renamed = own_entry["sender"].as_str().unwrap().to_string();
    assert_ne!(renamed, "alice");
    assert!(renamed.starts_with("alice"));
    assert_eq!(next_chat(&mut first).await["sender"], renamed.as_str());
    assert_eq!(store.get_member_count(&room_id).await.unwrap(), 2);

    let refused = connect_async(format!("{base}/ws/chat?roomId={room_id}&username=carol"))
        .await
        .map(|_| ());
    match refused {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status(), 409),
        other => panic!("expected the full room to refuse the upgrade, got {other:?}"),
    }

    second
        .send(Message::text(json!({ "message": "hi" }).to_string()))
        .await
        .unwrap();
    let talk = next_chat(&mut first).await;
    assert_eq!(talk["type"], "TALK");
    assert_eq!(talk["sender"], renamed.as_str());
    assert_eq!(talk["message"], "hi");

    first.close(None).await.unwrap();
    let talk_echo = next_chat(&mut second).await;
    assert_eq!(talk_echo["type"], "TALK");
    let left = next_chat(&mut second).await;
    assert_eq!(left["type"], "LEAVE");
    assert_eq!(left["message"], "alice has left.");
    assert_eq!(store.get_member_count(&room_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_room_refuses_upgrade() {
    let base = spawn_server(Arc::new(MemoryRoomStore::new())).await;

    match connect_async(format!("{base}/ws/chat?roomId=missing&username=alice"))
        .await
        .map(|_| ())
    {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status(), 404),
        other => panic!("expected 404, got {other:?}"),
    }
}

/// Passes the upgrade-time capacity check but loses the race to register.
struct FilledAtJoin(MemoryRoomStore);

#[async_trait]
impl RoomStore for FilledAtJoin {
    async fn create_room(&self, room: &Room) -> Result<()> {
        self.0.create_room(room).await
    }

    async fn get_room(&self, room_id: &str) -> Result<Option<Room>> {
        self.0.get_room(room_id).await
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.0.list_rooms().await
    }

    async fn delete_room(&self, room_id: &str) -> Result<()> {
        self.0.delete_room(room_id).await
    }

    async fn add_member_if_space(&self, _: &str, _: &Member, _: u32) -> Result<bool> {
        Ok(false)
    }

    async fn remove_member(&self, room_id: &str, user_id: &str) -> Result<Option<String>> {
        self.0.remove_member(room_id, user_id).await
    }

    async fn get_members(&self, room_id: &str) -> Result<Vec<Member>> {
        self.0.get_members(room_id).await
    }

    async fn get_member_count(&self, room_id: &str) -> Result<usize> {
        self.0.get_member_count(room_id).await
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

#[tokio::test]
async fn test_socket_closed_when_room_fills_before_registration() {
    let store = Arc::new(FilledAtJoin(MemoryRoomStore::new()));
    let base = spawn_server(store.clone()).await;
    let room_id = new_room(store.as_ref(), 2).await;

    let mut socket = join(&base, &room_id, "alice").await;
    let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
        .await
        .expect("timed out waiting for close");
    assert!(
        matches!(frame, Some(Ok(Message::Close(_))) | None),
        "expected close, got {frame:?}"
    );
    assert_eq!(store.get_member_count(&room_id).await.unwrap(), 0);
}
