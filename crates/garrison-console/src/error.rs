//! Console error types.

use garrison_access::AccessError;
use garrison_audit::AuditError;
use garrison_reports::ReportError;
use garrison_storage::StorageError;

/// Errors from console operations.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The call needs a logged-in user.
    #[error("not logged in")]
    NotLoggedIn,

    /// Admin checks are enforced but no owner is configured, so nobody
    /// could ever approve an access request.
    #[error("no owner configured while admin checks are enforced")]
    MissingOwner,

    /// The session user may not perform the call.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Access workflow failure.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Report catalog failure.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The session key could not be read or written.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StorageError),

    /// Audit log failure.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// A snapshot could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;
