//! Error types for Larder
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for Larder
#[derive(Error, Debug)]
pub enum LarderError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Larder
pub type Result<T> = std::result::Result<T, LarderError>;
