//! Error types for recall storage.

use recall_core::ValidationError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key-value backend failed or could not be reached.
    #[error("backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Input rejected before any store access.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
