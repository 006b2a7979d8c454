use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::validation::ValidationError;

/// Code the lobby client surfaces verbatim when a deletion is refused.
pub const ROOM_HAS_USERS_CODE: &str = "40041";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Room is full")]
    RoomFull,

    #[error("The room still has {0} user(s) inside and cannot be deleted")]
    RoomHasUsers(usize),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) | AppError::RedisError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::RoomFull | AppError::RoomHasUsers(_) => StatusCode::CONFLICT,
        }
    }

    /// Stable business code carried in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "40000",
            AppError::Validation(_) => "40001",
            AppError::RoomHasUsers(_) => ROOM_HAS_USERS_CODE,
            AppError::NotFound(_) => "40400",
            AppError::RoomFull => "40900",
            AppError::InternalError(_) => "50000",
            AppError::RedisError(_) => "50001",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            // Store details stay in the logs.
            AppError::InternalError(msg) | AppError::RedisError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorBody {
            code: self.code().to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

impl From<deadpool_redis::PoolError> for AppError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
