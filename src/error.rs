//! Error types for trail-lens

use thiserror::Error;

/// Main error type for trail-lens operations
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

    #[error("Server error: {0}")]
    Server(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Tourism service error: {0}")]
    Tourism(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Controller error: {0}")]
    Controller(String),
}

/// Result type alias for trail-lens operations
pub type Result<T> = std::result::Result<T, Error>;
