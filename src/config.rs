use std::env;

/// Which room store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub room_ttl_seconds: u64,
    pub max_msg_chat_users: u32,
    pub max_rtc_chat_users: u32,
    pub password_pepper: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "redis" => StoreBackend::Redis,
            other => return Err(ConfigError::UnknownStoreBackend(other.to_string())),
        };

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            store_backend,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            room_ttl_seconds: env::var("ROOM_TTL_SECONDS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .unwrap_or(86400),
            max_msg_chat_users: env::var("MAX_MSG_CHAT_USERS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
            max_rtc_chat_users: env::var("MAX_RTC_CHAT_USERS")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .unwrap_or(6),
            password_pepper: env::var("PASSWORD_PEPPER").unwrap_or_default(),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Capacity limits handed to the creation validator.
    pub fn capacity_limits(&self) -> crate::validation::CapacityLimits {
        crate::validation::CapacityLimits {
            msg_chat: self.max_msg_chat_users,
            rtc_chat: self.max_rtc_chat_users,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            store_backend: StoreBackend::Memory,
            redis_url: "redis://localhost:6379".to_string(),
            room_ttl_seconds: 86400,
            max_msg_chat_users: 100,
            max_rtc_chat_users: 6,
            password_pepper: String::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Unknown STORE_BACKEND '{0}', expected 'memory' or 'redis'")]
    UnknownStoreBackend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_match_chat_types() {
        let limits = Config::default().capacity_limits();
        assert_eq!(limits.msg_chat, 100);
        assert_eq!(limits.rtc_chat, 6);
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server_host: "localhost".to_string(),
            server_port: 9000,
            ..Config::default()
        };
        assert_eq!(config.server_addr(), "localhost:9000");
    }
}
