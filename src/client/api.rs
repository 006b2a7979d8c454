use async_trait::async_trait;

use crate::error::ErrorBody;
use crate::models::{CreateRoomRequest, RoomSummary};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server responded with status {status}")]
    Server {
        status: u16,
        body: Option<ErrorBody>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Business code from the server's error body, if it sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                body: Some(body), ..
            } => Some(body.code.as_str()),
            _ => None,
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                body: Some(body), ..
            } => Some(body.message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Requests the lobby issues against the room service.
#[async_trait]
pub trait RoomApi: Send + Sync {
    /// `POST /chat/confirmPwd/{roomId}`
    async fn confirm_password(&self, room_id: &str, password: &str) -> Result<bool, ApiError>;

    /// `GET /chat/chkUserCnt/{roomId}`; `true` means there is space.
    async fn check_user_count(&self, room_id: &str) -> Result<bool, ApiError>;

    /// `GET /chat/delRoom/{roomId}`
    async fn delete_room(&self, room_id: &str) -> Result<(), ApiError>;

    /// `POST /chat/createroom`
    async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomSummary, ApiError>;

    /// `GET /chat/rooms`
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ApiError>;
}
