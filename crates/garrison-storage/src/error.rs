//! Storage error types.

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A storage operation failed inside the backend.
    #[error("storage error: {0}")]
    Internal(String),

    /// The backend could not be opened or reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// A stored blob could not be encoded or decoded.
    #[error("serialization error in '{key}': {message}")]
    Serialization {
        /// Key whose value failed to (de)serialize.
        key: String,
        /// Underlying serde message.
        message: String,
    },

    /// The namespace or key is invalid.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
