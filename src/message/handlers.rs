use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::MessageModel;
use crate::shared::{AppError, AppState};

/// Maximum number of messages returned by the history endpoint
pub const HISTORY_LIMIT: i64 = 20;

/// HTTP handler for fetching a room's message history
///
/// GET /messages/:room_id
/// Returns up to 20 messages, oldest first. Rooms with no stored
/// messages return an empty array.
#[instrument(name = "room_history", skip(state))]
pub async fn room_history(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<MessageModel>>, AppError> {
    info!(room_id = %room_id, "Fetching room history");

    let messages = state
        .message_repository
        .list_room_messages(&room_id, HISTORY_LIMIT)
        .await?;

    info!(
        room_id = %room_id,
        message_count = messages.len(),
        "Room history fetched"
    );

    Ok(Json(messages))
}
