//! Error types for inmet-geocode

use thiserror::Error;

/// Main error type for inmet-geocode operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Upstream(u16),

    /// Upstream answered 200 but the body had no usable structure
    #[error("Malformed upstream payload: {0}")]
    Payload(String),

    #[error("Boundary dataset error: {0}")]
    Dataset(String),

    #[error("Unsupported geometry: {0}")]
    Geometry(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for inmet-geocode operations
pub type Result<T> = std::result::Result<T, Error>;
