//! Server state and configuration.

use crate::client::Dispatcher;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8080")
    pub listen_addr: String,
    /// Base URL of the generation service (e.g., "http://localhost:8000")
    pub upstream_url: String,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let dispatcher = Dispatcher::over_http(&config.upstream_url);
        Self { config, dispatcher }
    }
}
