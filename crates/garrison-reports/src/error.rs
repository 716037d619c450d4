//! Report catalog error types.

use garrison_audit::AuditError;
use garrison_storage::StorageError;

/// Errors from the report catalog.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report is incomplete or inconsistent.
    #[error("invalid report: {0}")]
    Validation(String),

    /// No report has the given ID.
    #[error("report not found: {0}")]
    NotFound(String),

    /// The catalog could not be read or written.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StorageError),

    /// The report was stored but its audit entry could not be written.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
