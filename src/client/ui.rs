//! User-facing side effects of the lobby flows.

pub const MSG_WRONG_PASSWORD: &str = "Incorrect password. Please check the password.";
pub const MSG_ROOM_FULL: &str = "The room is full and cannot be entered.";
pub const MSG_UNREACHABLE: &str = "Could not reach the chat server. Please try again.";
pub const MSG_ROOM_DELETED: &str = "Room deleted";
pub const MSG_DELETE_FAILED: &str = "An error occurred while deleting the room.";
pub const MSG_CREATE_FAILED: &str = "An error occurred while creating the room.";

/// Where the lobby goes after a room is deleted or created.
pub const LOBBY_LOCATION: &str = "/";

/// Page of a room, as navigated to after a successful admission.
pub fn room_location(room_id: &str) -> String {
    format!("/chat/room?roomId={}", room_id)
}

pub trait LobbyUi: Send + Sync {
    /// Show a blocking message to the user.
    fn alert(&self, message: &str);

    /// Leave the lobby for `location`.
    fn navigate(&self, location: &str);
}

/// Terminal rendering: alerts go to stderr, navigation prints the target.
#[derive(Debug, Default)]
pub struct ConsoleUi {
    base_url: String,
}

impl ConsoleUi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl LobbyUi for ConsoleUi {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }

    fn navigate(&self, location: &str) {
        println!("-> {}{}", self.base_url, location);
    }
}
