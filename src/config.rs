use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;

/// Server settings resolved from the environment at startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub public_socket_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(port = %raw, "invalid PORT value, using default");
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        Self {
            port,
            database_url: std::env::var("DATABASE_URL").ok(),
            public_socket_url: std::env::var("PUBLIC_SOCKET_URL").ok(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            public_socket_url: None,
        }
    }
}
