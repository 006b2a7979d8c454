use std::sync::Arc;

use crate::config::Config;
use crate::store::RoomStore;
use crate::validation::RoomCreationValidator;
use crate::ws::ConnectionsManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn RoomStore>,
    pub validator: RoomCreationValidator,
    pub connections: Arc<ConnectionsManager>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn RoomStore>) -> Self {
        let validator = RoomCreationValidator::new(config.capacity_limits());
        Self {
            config: Arc::new(config),
            store,
            validator,
            connections: Arc::new(ConnectionsManager::new()),
        }
    }
}
