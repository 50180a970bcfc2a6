use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MessageModel {
    pub room_id: String,
    pub sender: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl MessageModel {
    /// Creates a new message model stamped with the current time
    /// The same timestamp is persisted and broadcast to the room
    pub fn new(room_id: String, sender: String, message: String) -> Self {
        Self {
            room_id,
            sender,
            message,
            created_at: Utc::now(),
        }
    }
}
