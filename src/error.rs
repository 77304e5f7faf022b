//! Error types for Masar

use thiserror::Error;

/// Result type alias for Masar operations
pub type Result<T> = std::result::Result<T, MasarError>;

/// Main error type for Masar
///
/// The routing path itself is infallible: `detect_intent` produces a result
/// for any input. Errors only surface at configuration seams, before a
/// router or store is put into service.
#[derive(Error, Debug)]
pub enum MasarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
