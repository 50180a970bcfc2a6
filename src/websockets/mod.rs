// Public API
pub use events::{EventType, ReceiveMessagePayload, SendMessagePayload, SocketEvent};
pub use handler::{websocket_handler, RelayReceiveHandler};
pub use socket::{Connection, MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod events;
mod handler;
mod socket;
