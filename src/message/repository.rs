use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::MessageModel;
use crate::shared::AppError;

/// Trait for message repository operations
#[async_trait]
pub trait MessageRepository {
    async fn insert_message(&self, message: &MessageModel) -> Result<(), AppError>;
    /// Returns up to `limit` messages for a room, oldest first
    async fn list_room_messages(
        &self,
        room_id: &str,
        limit: i64,
    ) -> Result<Vec<MessageModel>, AppError>;
}

/// In-memory implementation of MessageRepository for development and testing
///
/// This provides a realistic implementation that can be used in development
/// without requiring a real database connection. Data is stored in memory
/// and will be lost when the application restarts.
pub struct InMemoryMessageRepository {
    messages: Mutex<HashMap<String, Vec<MessageModel>>>,
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMessageRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated messages
    pub fn with_messages(messages: Vec<MessageModel>) -> Self {
        let mut message_map: HashMap<String, Vec<MessageModel>> = HashMap::new();
        for message in messages {
            message_map
                .entry(message.room_id.clone())
                .or_default()
                .push(message);
        }

        Self {
            messages: Mutex::new(message_map),
        }
    }

    /// Returns the total number of stored messages across all rooms
    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().values().map(Vec::len).sum()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    #[instrument(skip(self, message))]
    async fn insert_message(&self, message: &MessageModel) -> Result<(), AppError> {
        debug!(room_id = %message.room_id, sender = %message.sender, "Storing message in memory");

        let mut messages = self.messages.lock().unwrap();
        messages
            .entry(message.room_id.clone())
            .or_default()
            .push(message.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_room_messages(
        &self,
        room_id: &str,
        limit: i64,
    ) -> Result<Vec<MessageModel>, AppError> {
        debug!(room_id = %room_id, limit = limit, "Fetching messages from memory");

        let messages = self.messages.lock().unwrap();
        let mut room_messages = messages.get(room_id).cloned().unwrap_or_default();
        room_messages.sort_by_key(|m| m.created_at);
        room_messages.truncate(limit as usize);

        debug!(room_id = %room_id, count = room_messages.len(), "Messages fetched from memory");
        Ok(room_messages)
    }
}

/// PostgreSQL implementation of message repository
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    #[instrument(skip(self, message))]
    async fn insert_message(&self, message: &MessageModel) -> Result<(), AppError> {
        debug!(room_id = %message.room_id, sender = %message.sender, "Storing message in database");

        sqlx::query(
            "INSERT INTO messages (room_id, sender, message, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&message.room_id)
        .bind(&message.sender)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %message.room_id, "Failed to store message in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(room_id = %message.room_id, "Message stored successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_room_messages(
        &self,
        room_id: &str,
        limit: i64,
    ) -> Result<Vec<MessageModel>, AppError> {
        debug!(room_id = %room_id, limit = limit, "Fetching messages from database");

        let rows = sqlx::query(
            "SELECT room_id, sender, message, created_at FROM messages WHERE room_id = $1 ORDER BY created_at ASC LIMIT $2"
        )
        .bind(room_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, room_id = %room_id, "Failed to fetch messages from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let messages = rows
            .into_iter()
            .map(|row| MessageModel {
                room_id: row.get("room_id"),
                sender: row.get("sender"),
                message: row.get("message"),
                created_at: row.get("created_at"),
            })
            .collect::<Vec<_>>();

        debug!(room_id = %room_id, count = messages.len(), "Messages fetched from database");
        Ok(messages)
    }
}
