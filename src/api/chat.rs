use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use rand::Rng;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{DuplicateNameQuery, RoomIdQuery};
use crate::state::AppState;
use crate::store::RoomStore;

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/userlist", get(user_list))
        .route("/duplicateName", get(duplicate_name))
}

const SUFFIX_ATTEMPTS: usize = 100;

/// Return `requested` if nobody in the room uses it, otherwise append a
/// random number in 1..=100. Once those keep colliding, fall back to a
/// short random hex suffix.
pub async fn unique_username(
    store: &dyn RoomStore,
    room_id: &str,
    requested: &str,
) -> Result<String> {
    let taken: Vec<String> = store
        .get_members(room_id)
        .await?
        .into_iter()
        .map(|m| m.username)
        .collect();

    if !taken.iter().any(|name| name == requested) {
        return Ok(requested.to_string());
    }

    let mut rng = rand::rng();
    for _ in 0..SUFFIX_ATTEMPTS {
        let candidate = format!("{}{}", requested, rng.random_range(1..=100));
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
    }

    loop {
        let candidate = format!("{}-{}", requested, &Uuid::new_v4().simple().to_string()[..8]);
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
    }
}

/// GET /chat/userlist?roomId=
async fn user_list(
    State(state): State<AppState>,
    Query(query): Query<RoomIdQuery>,
) -> Result<Json<Vec<String>>> {
    state
        .store
        .get_room(&query.room_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", query.room_id)))?;

    let names = state
        .store
        .get_members(&query.room_id)
        .await?
        .into_iter()
        .map(|m| m.username)
        .collect();

    Ok(Json(names))
}

/// GET /chat/duplicateName?roomId=&username=
async fn duplicate_name(
    State(state): State<AppState>,
    Query(query): Query<DuplicateNameQuery>,
) -> Result<Json<String>> {
    let username = unique_username(state.store.as_ref(), &query.room_id, &query.username).await?;
    tracing::debug!(room_id = %query.room_id, username = %username, "Nickname resolved");
    Ok(Json(username))
}
