mod handler;
mod messages;
mod session;

pub use handler::ws_routes;
pub use messages::{ChatInput, ChatMessage, MessageType};
pub use session::{ClientHandle, ConnectionsManager, RoomConnections};
