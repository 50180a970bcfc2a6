use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::models::MessageModel;

/// Event names for WebSocket communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    // Client -> Server
    JoinRoom,
    SendMessage,

    // Server -> Client
    ReceiveMessage,
}

/// Base structure for socket events
///
/// Every frame on the wire is `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketEvent {
    #[serde(rename = "event")]
    pub event_type: EventType,
    pub data: serde_json::Value,
}

/// Client-to-Server payload for send_message
///
/// The room key stays `roomID` on the wire, matching what clients send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessagePayload {
    #[serde(rename = "roomID")]
    pub room_id: String,
    pub message: String,
    pub sender: String,
}

/// Server-to-Client payload for receive_message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveMessagePayload {
    #[serde(rename = "roomID")]
    pub room_id: String,
    pub sender: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Helper functions for creating events
impl SocketEvent {
    pub fn new(event_type: EventType, data: serde_json::Value) -> Self {
        Self { event_type, data }
    }

    /// Create a join_room event; the payload is the bare room id
    pub fn join_room(room_id: String) -> Self {
        Self::new(EventType::JoinRoom, serde_json::Value::String(room_id))
    }

    /// Create a send_message event
    pub fn send_message(room_id: String, sender: String, message: String) -> Self {
        let payload = SendMessagePayload {
            room_id,
            message,
            sender,
        };
        Self::new(
            EventType::SendMessage,
            serde_json::to_value(payload).unwrap(),
        )
    }

    /// Create a receive_message event carrying a stored message
    pub fn receive_message(message: &MessageModel) -> Self {
        let payload = ReceiveMessagePayload {
            room_id: message.room_id.clone(),
            sender: message.sender.clone(),
            message: message.message.clone(),
            created_at: message.created_at,
        };
        Self::new(
            EventType::ReceiveMessage,
            serde_json::to_value(payload).unwrap(),
        )
    }
}
