// Public API - what other modules can use
pub use handlers::{room_history, HISTORY_LIMIT};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
