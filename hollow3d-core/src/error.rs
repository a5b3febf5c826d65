//! Error types for Hollow3D

use thiserror::Error;

/// Main error type for Hollow3D operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type alias for Hollow3D operations
pub type Result<T> = std::result::Result<T, Error>;
