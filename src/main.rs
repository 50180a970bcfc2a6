use axum::http::Method;
use std::sync::Arc;
use textre::config::ServerConfig;
use textre::message::repository::{
    InMemoryMessageRepository, MessageRepository, PostgresMessageRepository,
};
use textre::registry::RoomRegistry;
use textre::shared::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textre=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Textre chatroom server");

    let config = ServerConfig::from_env();

    // Pick the message store: PostgreSQL when configured, in-memory otherwise
    let message_repository: Arc<dyn MessageRepository + Send + Sync> =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = sqlx::PgPool::connect(database_url)
                    .await
                    .expect("Failed to connect to database");
                info!("Using PostgreSQL message store");
                Arc::new(PostgresMessageRepository::new(pool))
            }
            None => {
                warn!("DATABASE_URL not set, messages are stored in memory only");
                Arc::new(InMemoryMessageRepository::new())
            }
        };

    let registry = RoomRegistry::spawn();
    let app_state = AppState::new(message_repository, registry, config.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    // build our application
    let app = textre::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await.unwrap();
}
