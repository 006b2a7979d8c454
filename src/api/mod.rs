pub mod chat;
pub mod health;
pub mod rooms;

use axum::Router;

use crate::state::AppState;
use crate::ws::ws_routes;

/// Create the router with every lobby route
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/chat", chat_api_routes())
        .merge(health::health_routes())
        .merge(ws_routes())
        .with_state(state)
}

/// Routes under `/chat`
fn chat_api_routes() -> Router<AppState> {
    Router::new()
        .merge(rooms::room_routes())
        .merge(chat::chat_routes())
}
