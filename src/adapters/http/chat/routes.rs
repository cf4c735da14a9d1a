//! Axum routes for chat endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{get_messages, send_message, ChatAppState};

/// Creates routes for chat endpoints.
///
/// - POST /api/trips/:trip_id/chat/messages - Send a message, get the agent reply
/// - GET /api/trips/:trip_id/chat/messages - Chat history (`?limit=` for the latest N)
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new().route(
        "/trips/:trip_id/chat/messages",
        post(send_message).get(get_messages),
    )
}

/// Combined router with all chat routes under /api.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new().nest("/api", chat_routes())
}
