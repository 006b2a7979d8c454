use super::api::{ApiError, RoomApi};
use super::ui::{LobbyUi, LOBBY_LOCATION, MSG_DELETE_FAILED, MSG_ROOM_DELETED};
use crate::error::ROOM_HAS_USERS_CODE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    /// Deletion failed; `message` is what the user was shown.
    Refused { message: String },
}

/// User-facing text for a failed deletion. Only the known refusal code
/// carries the server's own message.
pub fn deletion_error_message(err: &ApiError) -> String {
    match (err.code(), err.server_message()) {
        (Some(ROOM_HAS_USERS_CODE), Some(message)) => message.to_string(),
        _ => MSG_DELETE_FAILED.to_string(),
    }
}

/// Delete `room_id`, then return to the lobby.
pub async fn delete_room(api: &dyn RoomApi, ui: &dyn LobbyUi, room_id: &str) -> DeletionOutcome {
    match api.delete_room(room_id).await {
        Ok(()) => {
            tracing::info!(room_id = %room_id, "Room deleted");
            ui.alert(MSG_ROOM_DELETED);
            ui.navigate(LOBBY_LOCATION);
            DeletionOutcome::Deleted
        }
        Err(e) => {
            tracing::warn!(room_id = %room_id, error = %e, "Room deletion failed");
            let message = deletion_error_message(&e);
            ui.alert(&message);
            DeletionOutcome::Refused { message }
        }
    }
}
