use super::api::RoomApi;
use super::ui::{LobbyUi, LOBBY_LOCATION, MSG_CREATE_FAILED};
use crate::models::{CreateRoomRequest, RoomSummary};
use crate::validation::{RoomCreationValidator, RoomDraft, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub enum CreationOutcome {
    Created(RoomSummary),
    /// Rejected locally; no request was sent.
    Invalid(ValidationError),
    Failed { message: String },
}

/// Validate `draft` against the rooms currently listed, then create it.
pub async fn create_room<'a, I>(
    api: &dyn RoomApi,
    ui: &dyn LobbyUi,
    validator: &RoomCreationValidator,
    draft: &RoomDraft,
    listed_names: I,
) -> CreationOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let valid = match validator.validate(draft, listed_names) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::debug!(error = %e, "Room draft rejected");
            ui.alert(&e.to_string());
            return CreationOutcome::Invalid(e);
        }
    };

    match api.create_room(&CreateRoomRequest::from(&valid)).await {
        Ok(room) => {
            tracing::info!(room_id = %room.room_id, name = %room.room_name, "Room created");
            ui.navigate(LOBBY_LOCATION);
            CreationOutcome::Created(room)
        }
        Err(e) => {
            tracing::error!(error = %e, "Room creation failed");
            // The server re-validates; its rule message is safe to show.
            let message = match (e.code(), e.server_message()) {
                (Some("40001"), Some(message)) => message.to_string(),
                _ => MSG_CREATE_FAILED.to_string(),
            };
            ui.alert(&message);
            CreationOutcome::Failed { message }
        }
    }
}
