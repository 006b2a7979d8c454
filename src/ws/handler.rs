use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::chat::unique_username;
use crate::error::AppError;
use crate::models::Room;
use crate::state::AppState;
use crate::store::Member;
use crate::ws::{ChatInput, ChatMessage, ClientHandle};

/// Query parameters for the chat socket
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsQueryParams {
    pub room_id: String,
    pub username: String,
}

/// WebSocket routes
pub fn ws_routes() -> Router<AppState> {
    Router::new().route("/ws/chat", get(ws_upgrade))
}

/// WebSocket upgrade handler
async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsQueryParams>,
) -> Result<Response, AppError> {
    let requested = params.username.trim();
    if requested.is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }

    let room = state
        .store
        .get_room(&params.room_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    // Early rejection; the socket re-checks atomically when it registers.
    let count = state.store.get_member_count(&room.room_id).await?;
    if !room.has_space(count) {
        return Err(AppError::RoomFull);
    }

    let username = unique_username(state.store.as_ref(), &room.room_id, requested).await?;

    tracing::info!(
        room_id = %room.room_id,
        username = %username,
        "WebSocket upgrade request"
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room, username)))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState, room: Room, username: String) {
    let conn_id = Uuid::new_v4().to_string();
    let user_id = Uuid::new_v4().to_string();
    let room_id = room.room_id.clone();

    let (mut ws_sender, mut ws_receiver) = socket.split();

    let member = Member {
        user_id: user_id.clone(),
        username: username.clone(),
    };
    match state
        .store
        .add_member_if_space(&room_id, &member, room.max_user_cnt)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(room_id = %room_id, "Room filled up before socket registered");
            let _ = ws_sender.send(Message::Close(None)).await;
            return;
        }
        Err(e) => {
            tracing::error!(room_id = %room_id, error = %e, "Failed to register member");
            let _ = ws_sender.send(Message::Close(None)).await;
            return;
        }
    }

    tracing::info!(
        conn_id = %conn_id,
        room_id = %room_id,
        user_id = %user_id,
        "WebSocket connected"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<ChatMessage>();
    let client_handle = ClientHandle::new(
        conn_id.clone(),
        user_id.clone(),
        room_id.clone(),
        username.clone(),
        tx,
    );
    state.connections.join_room(client_handle);

    // Task for sending messages to client
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    state
        .connections
        .broadcast_to_room(&room_id, &ChatMessage::enter(&room_id, &username));

    // Process incoming messages
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ChatInput>(&text) {
                Ok(input) => {
                    tracing::debug!(room_id = %room_id, sender = %username, "Chat message");
                    state.connections.broadcast_to_room(
                        &room_id,
                        &ChatMessage::talk(&room_id, &username, input.message),
                    );
                }
                Err(e) => {
                    tracing::warn!(conn_id = %conn_id, error = %e, "Ignoring malformed chat frame");
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(conn_id = %conn_id, "WebSocket close received");
                break;
            }
            Err(e) => {
                tracing::error!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    tracing::info!(
        conn_id = %conn_id,
        room_id = %room_id,
        user_id = %user_id,
        "WebSocket disconnected, cleaning up"
    );

    state.connections.remove_client_from_room(&room_id, &conn_id);

    match state.store.remove_member(&room_id, &user_id).await {
        Ok(Some(name)) => {
            state
                .connections
                .broadcast_to_room(&room_id, &ChatMessage::leave(&room_id, &name));
        }
        Ok(None) => {}
        Err(e) => tracing::error!(room_id = %room_id, error = %e, "Failed to remove member"),
    }

    send_task.abort();
}
