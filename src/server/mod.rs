//! # Preview HTTP Server
//!
//! Exposes the generation workflow over HTTP for a local preview UI.
//!
//! ## Usage
//!
//! ```bash
//! faro serve --listen 127.0.0.1:8080 --base-url http://localhost:8000
//! ```

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::FaroError;
use state::AppState;

/// Start the preview server.
///
/// ## Example
///
/// ```no_run
/// use faro::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), faro::FaroError> {
/// let config = ServerConfig {
///     listen_addr: "127.0.0.1:8080".to_string(),
///     upstream_url: "http://localhost:8000".to_string(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), FaroError> {
    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .route("/api/types", get(handlers::types))
        .route("/api/types/:type/fields", get(handlers::fields))
        .route("/api/generate/:type", post(handlers::generate))
        .route("/api/svg", post(handlers::svg_wrap))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(&state.config.listen_addr).await?;
    info!(addr = %state.config.listen_addr, "preview server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
