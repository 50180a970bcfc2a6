// Library crate for the Textre chatroom server
// This file exposes the public API for integration tests

use axum::{routing::get, Router};

pub mod config;
pub mod message;
pub mod pages;
pub mod registry;
pub mod shared;
pub mod websockets;

/// Builds the application router with every route mounted
///
/// Middleware (tracing, CORS) is layered on by the binary so tests can
/// drive the bare routes.
pub fn app(state: shared::AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Chatroom backend is running" }))
        .route("/messages/:room_id", get(message::room_history))
        .route("/ws", get(websockets::websocket_handler))
        .route("/app", get(pages::lobby))
        .route("/app/chat", get(pages::chat_room))
        .with_state(state)
}

// Re-export commonly used types for easier access in tests
pub use message::{models::MessageModel, repository::MessageRepository, HISTORY_LIMIT};
pub use registry::RoomRegistry;
pub use shared::{AppError, AppState};
pub use websockets::{
    Connection, EventType, MessageHandler, ReceiveMessagePayload, RelayReceiveHandler,
    SendMessagePayload, SocketEvent,
};
