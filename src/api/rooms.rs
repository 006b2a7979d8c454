use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::models::{
    ConfirmPasswordRequest, CreateRoomRequest, Room, RoomIdQuery, RoomSummary,
};
use crate::security::{generate_salt_hex, hash_room_password, verify_room_password};
use crate::state::AppState;
use crate::validation::RoomDraft;

/// Room routes
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/createroom", post(create_room))
        .route("/room", get(get_room))
        .route("/confirmPwd/{room_id}", post(confirm_password))
        .route("/chkUserCnt/{room_id}", get(check_user_count))
        .route("/delRoom/{room_id}", get(delete_room))
}

async fn load_room(state: &AppState, room_id: &str) -> Result<Room> {
    state
        .store
        .get_room(room_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))
}

/// GET /chat/rooms - All rooms, newest first
async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomSummary>>> {
    let rooms = state.store.list_rooms().await?;

    let mut summaries = Vec::with_capacity(rooms.len());
    for room in rooms {
        let count = state.store.get_member_count(&room.room_id).await?;
        summaries.push(room.summary(count));
    }

    Ok(Json(summaries))
}

/// POST /chat/createroom - Validate and create a room
async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<RoomSummary>> {
    let draft = RoomDraft::from(request);

    let existing = state.store.list_rooms().await?;
    let valid = state
        .validator
        .validate(&draft, existing.iter().map(|room| room.room_name.as_str()))?;

    let salt = generate_salt_hex();
    let pwd_hash = hash_room_password(&valid.password, &salt, &state.config.password_pepper);

    let room = Room::new(
        valid.name,
        pwd_hash,
        salt,
        valid.chat_type,
        valid.max_user_cnt,
        valid.secret,
    );
    state.store.create_room(&room).await?;

    tracing::info!(
        room_id = %room.room_id,
        name = %room.room_name,
        chat_type = %room.chat_type,
        max_user_cnt = room.max_user_cnt,
        "Room created"
    );

    Ok(Json(room.summary(0)))
}

/// GET /chat/room?roomId= - Room detail
async fn get_room(
    State(state): State<AppState>,
    Query(query): Query<RoomIdQuery>,
) -> Result<Json<RoomSummary>> {
    let room = load_room(&state, &query.room_id).await?;
    let count = state.store.get_member_count(&room.room_id).await?;

    tracing::info!(room_id = %room.room_id, "Room detail");
    Ok(Json(room.summary(count)))
}

/// POST /chat/confirmPwd/{room_id} - Does the password match?
async fn confirm_password(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(request): Json<ConfirmPasswordRequest>,
) -> Result<Json<bool>> {
    let room = load_room(&state, &room_id).await?;

    let matches = verify_room_password(
        &request.room_pwd,
        &room.pwd_salt,
        &state.config.password_pepper,
        &room.pwd_hash,
    );

    tracing::debug!(room_id = %room_id, matches, "Password confirmation");
    Ok(Json(matches))
}

/// GET /chat/chkUserCnt/{room_id} - Is there space for one more user?
async fn check_user_count(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<bool>> {
    let room = load_room(&state, &room_id).await?;
    let count = state.store.get_member_count(&room_id).await?;

    Ok(Json(room.has_space(count)))
}

/// GET /chat/delRoom/{room_id} - Delete an empty room
async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<bool>> {
    let room = load_room(&state, &room_id).await?;

    let count = state.store.get_member_count(&room.room_id).await?;
    if count > 0 {
        tracing::info!(room_id = %room_id, count, "Refusing to delete occupied room");
        return Err(AppError::RoomHasUsers(count));
    }

    state.store.delete_room(&room.room_id).await?;
    Ok(Json(true))
}
