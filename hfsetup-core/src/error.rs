//! Error types for hfsetup-core

use thiserror::Error;

/// Main error type for the hfsetup-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error reading or writing the setup record
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Hugging Face Hub API error
    #[error("hub error: {0}")]
    Hub(String),
}

/// Result type alias for hfsetup-core
pub type Result<T> = std::result::Result<T, Error>;
