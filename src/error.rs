//! # Error Types
//!
//! This module defines error types used throughout the faro library.

use thiserror::Error;

/// Main error type for faro operations
#[derive(Debug, Error)]
pub enum FaroError {
    /// A required field is missing or a value is unusable. Caught before
    /// any request is dispatched.
    #[error("Invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    /// The request failed in transit or the service answered non-2xx
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered 2xx with a zero-length body
    #[error("Received empty response from server")]
    EmptyResponse,

    /// Raster decode or vector-wrap failure
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Options store serialization error
    #[error("Store error: {0}")]
    Store(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
