use alloy_primitives::hex::FromHexError;

/// Error types for the runner
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Failed to read or write a file
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid hex string
    #[error("Invalid hex string: {0}")]
    InvalidHex(#[from] FromHexError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to install the log subscriber
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type for the runner
pub type Result<T> = std::result::Result<T, RunError>;
