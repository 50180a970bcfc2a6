use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::message::models::MessageModel;
use crate::message::repository::MessageRepository;
use crate::registry::RoomRegistry;
use crate::shared::AppState;
use crate::websockets::events::{EventType, SendMessagePayload, SocketEvent};

use super::socket::{Connection, MessageHandler};

/// Message handler that relays client events through the room registry
pub struct RelayReceiveHandler {
    registry: RoomRegistry,
    message_repository: Arc<dyn MessageRepository + Send + Sync>,
}

impl RelayReceiveHandler {
    pub fn new(
        registry: RoomRegistry,
        message_repository: Arc<dyn MessageRepository + Send + Sync>,
    ) -> Self {
        Self {
            registry,
            message_repository,
        }
    }

    fn handle_join_room(&self, connection_id: Uuid, data: &serde_json::Value) {
        match data.as_str() {
            Some(room_id) => {
                info!(
                    connection_id = %connection_id,
                    room_id = %room_id,
                    "Connection joining room"
                );
                self.registry.join_room(connection_id, room_id);
            }
            None => {
                warn!(
                    connection_id = %connection_id,
                    "join_room payload is not a string, ignoring"
                );
            }
        }
    }

    async fn handle_send_message(&self, connection_id: Uuid, data: serde_json::Value) {
        let payload = match serde_json::from_value::<SendMessagePayload>(data) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Malformed send_message payload, ignoring"
                );
                return;
            }
        };

        if payload.room_id.is_empty() {
            warn!(
                connection_id = %connection_id,
                sender = %payload.sender,
                "send_message without a room, dropping"
            );
            return;
        }
        if payload.message.is_empty() {
            debug!(
                connection_id = %connection_id,
                room_id = %payload.room_id,
                "Empty message dropped"
            );
            return;
        }

        let message = MessageModel::new(payload.room_id, payload.sender, payload.message);

        // The message is only relayed once it is stored; a failed write means
        // no member (the sender included) ever sees it
        if let Err(e) = self.message_repository.insert_message(&message).await {
            warn!(
                room_id = %message.room_id,
                error = %e,
                "Message not persisted, dropping broadcast"
            );
            return;
        }

        let frame = SocketEvent::receive_message(&message);
        match serde_json::to_string(&frame) {
            Ok(frame_json) => {
                self.registry.broadcast(&message.room_id, frame_json);
                info!(
                    room_id = %message.room_id,
                    sender = %message.sender,
                    "Message relayed to room"
                );
            }
            Err(e) => {
                warn!(
                    room_id = %message.room_id,
                    error = %e,
                    "Failed to serialize receive_message frame"
                );
            }
        }
    }
}

#[async_trait]
impl MessageHandler for RelayReceiveHandler {
    async fn handle_message(&self, connection_id: Uuid, message: String) {
        debug!(
            connection_id = %connection_id,
            message = %message,
            "Received message"
        );

        match serde_json::from_str::<SocketEvent>(&message) {
            Ok(event) => match event.event_type {
                EventType::JoinRoom => self.handle_join_room(connection_id, &event.data),
                EventType::SendMessage => self.handle_send_message(connection_id, event.data).await,
                EventType::ReceiveMessage => {
                    debug!(
                        connection_id = %connection_id,
                        "Ignoring server-to-client event from client"
                    );
                }
            },
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
            }
        }
    }
}

/// WebSocket endpoint for the chat relay
///
/// GET /ws - connections are anonymous and carry no room until they
/// send a join_room event
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    info!("WebSocket connection requested");
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4();
    info!(connection_id = %connection_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    // Register the connection so room broadcasts can reach it
    app_state.registry.connect(connection_id, outbound_sender);

    // Wrap the axum WebSocket in our simple interface
    let socket_wrapper = Box::new(socket);

    let message_handler = Arc::new(RelayReceiveHandler::new(
        app_state.registry.clone(),
        Arc::clone(&app_state.message_repository),
    ));

    let connection = Connection::new(
        connection_id,
        socket_wrapper,
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }

    // Cleanup: drop room memberships and the outbound route
    app_state.registry.disconnect(connection_id);
}
