use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::shared::AppState;

const LOBBY_PAGE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/pages/index.html"));
const CHAT_PAGE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/pages/chat.html"));

/// Serves the lobby page where a room id and username are picked
///
/// GET /app
pub async fn lobby() -> Html<&'static str> {
    Html(LOBBY_PAGE)
}

/// Serves the chat room page
///
/// GET /app/chat?roomId=..&username=..
/// The `{socket_url}` placeholder becomes the configured public socket
/// URL; left empty, the page derives one from its own origin.
#[instrument(name = "chat_room", skip(state))]
pub async fn chat_room(State(state): State<AppState>) -> Html<String> {
    let socket_url = state.config.public_socket_url.clone().unwrap_or_default();
    Html(CHAT_PAGE.replace("{socket_url}", &socket_url))
}
