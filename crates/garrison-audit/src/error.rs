//! Audit-related error types.

use garrison_storage::StorageError;
use thiserror::Error;

/// Errors that can occur with audit logging.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The log could not be read or written.
    #[error("audit storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
