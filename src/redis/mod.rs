pub mod room_repository;

pub use room_repository::*;

use deadpool_redis::{Config as RedisConfig, Pool, Runtime};

use crate::config::Config;
use crate::error::{AppError, Result};

/// Create a Redis connection pool
pub fn create_pool(config: &Config) -> Result<Pool> {
    let redis_config = RedisConfig::from_url(&config.redis_url);
    let pool = redis_config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| AppError::RedisError(format!("Failed to create Redis pool: {}", e)))?;

    Ok(pool)
}

/// Pool plus repository, with rooms expiring after `room_ttl_seconds`.
pub fn connect(config: &Config) -> Result<RoomRepository> {
    let pool = create_pool(config)?;
    tracing::info!(url = %config.redis_url, "Redis pool created");
    Ok(RoomRepository::new(pool, config.room_ttl_seconds))
}
