//! # Faro - QR Code Generation Client
//!
//! Faro is a Rust client for a remote QR-image generation service. It
//! provides:
//!
//! - **Field schemas**: the per-type input field registry
//! - **Normalization**: form values to canonical request parameters
//! - **Common options**: persisted cross-type defaults
//! - **Dispatch**: request/response handling against the service
//! - **Media lifecycle**: preview state, downloads, and the SVG wrap
//!
//! ## Quick Start
//!
//! ```no_run
//! use faro::client::Dispatcher;
//! use faro::media::FailurePolicy;
//! use faro::options::MemoryStore;
//! use faro::schema::QrType;
//! use faro::studio::Studio;
//!
//! # async fn example() -> Result<(), faro::FaroError> {
//! let dispatcher = Dispatcher::over_http("http://localhost:8000");
//! let mut studio = Studio::new(
//!     QrType::Wifi,
//!     dispatcher,
//!     MemoryStore::default(),
//!     FailurePolicy::default(),
//! );
//!
//! studio.set_field("ssid", "Home");
//! studio.set_field("password", "secret");
//! studio.set_field("encryption", "WPA");
//! studio.submit().await?;
//!
//! if let Some(image) = studio.media().current() {
//!     std::fs::write("qr-code.png", image.bytes())?;
//!     std::fs::write("qr-code.svg", image.to_svg()?)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Content types and field descriptors |
//! | [`form`] | Per-type form values and validation |
//! | [`request`] | Payload normalization |
//! | [`options`] | Persisted common options |
//! | [`client`] | Generation dispatch |
//! | [`media`] | Generated-image lifecycle |
//! | [`studio`] | Workflow composition |
//! | [`server`] | Local preview HTTP server |
//! | [`error`] | Error types |

pub mod client;
pub mod error;
pub mod form;
pub mod media;
pub mod options;
pub mod request;
pub mod schema;
pub mod server;
pub mod studio;

// Re-exports for convenience
pub use error::FaroError;
pub use schema::QrType;
pub use studio::Studio;
