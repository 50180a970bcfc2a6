use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::message::repository::MessageRepository;
use crate::registry::RoomRegistry;

/// State handed to every handler: the message store, the room registry
/// and the resolved configuration
#[derive(Clone)]
pub struct AppState {
    pub message_repository: Arc<dyn MessageRepository + Send + Sync>,
    pub registry: RoomRegistry,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(
        message_repository: Arc<dyn MessageRepository + Send + Sync>,
        registry: RoomRegistry,
        config: ServerConfig,
    ) -> Self {
        Self {
            message_repository,
            registry,
            config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
