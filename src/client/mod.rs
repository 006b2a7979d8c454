//! Lobby client: the flows a user runs from the room list page.

pub mod admission;
pub mod api;
pub mod creation;
pub mod deletion;
pub mod http;
pub mod ui;

#[cfg(test)]
mod testing;

pub use admission::{AdmissionAttempt, AdmissionFlow, AdmissionOutcome, PasswordCheck};
pub use api::{ApiError, RoomApi};
pub use creation::{create_room, CreationOutcome};
pub use deletion::{delete_room, deletion_error_message, DeletionOutcome};
pub use http::HttpRoomApi;
pub use ui::{room_location, ConsoleUi, LobbyUi};
