pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod redis;
pub mod security;
pub mod state;
pub mod store;
pub mod validation;
pub mod ws;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
