use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Minimal surface of a client socket: text frames in, text frames out
#[async_trait]
pub trait SocketWrapper: Send {
    /// Push one text frame to the client
    async fn send_frame(&mut self, frame: String) -> Result<(), SocketError>;

    /// Next text frame from the client, or None once the socket is closed
    async fn next_frame(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Consumer of inbound frames, one call per frame
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, connection_id: Uuid, message: String);
}

#[derive(Error, Debug)]
pub enum SocketError {
    #[error("failed to send frame: {0}")]
    SendFailed(String),

    #[error("failed to receive frame: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_frame(&mut self, frame: String) -> Result<(), SocketError> {
        self.send(Message::Text(frame))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn next_frame(&mut self) -> Result<Option<String>, SocketError> {
        // Binary, ping and pong frames carry no chat events; skip them and
        // keep reading. Pings are answered by the transport.
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
                None => return Ok(None),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// One client connection, driven until either side hangs up
///
/// Frames queued by the room registry arrive on `outbound_receiver` and go
/// straight to the socket; frames read from the socket go to the message
/// handler. The loop ends when the client closes or the outbound channel
/// is dropped.
pub struct Connection {
    pub connection_id: Uuid,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    message_handler: Arc<dyn MessageHandler>,
}

impl Connection {
    pub fn new(
        connection_id: Uuid,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        message_handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            connection_id,
            socket,
            outbound_receiver,
            message_handler,
        }
    }

    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                queued = self.outbound_receiver.recv() => {
                    match queued {
                        Some(frame) => self.socket.send_frame(frame).await?,
                        // Outbound channel dropped, the registry no longer
                        // knows this connection
                        None => break,
                    }
                }

                inbound = self.socket.next_frame() => {
                    match inbound {
                        Ok(Some(frame)) => {
                            self.message_handler
                                .handle_message(self.connection_id, frame)
                                .await;
                        }
                        Ok(None) => break, // Client hung up
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        let _ = self.socket.close().await;
        Ok(())
    }
}
