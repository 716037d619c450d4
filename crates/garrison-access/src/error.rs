//! Access workflow error types.

use std::fmt;

use garrison_audit::AuditError;
use garrison_core::UserStatus;
use garrison_storage::StorageError;

/// Why an email could not log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No user has this email.
    NotRegistered,
    /// The access request has not been reviewed yet.
    Pending,
    /// The access request was rejected or revoked.
    Rejected,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotRegistered => "email is not registered",
            Self::Pending => "access request is awaiting approval",
            Self::Rejected => "access was denied",
        };
        f.write_str(msg)
    }
}

/// Errors from the access workflow.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// Input failed validation.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Another user already registered this email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Login refused.
    #[error("login refused for {email}: {reason}")]
    AuthenticationDenied {
        /// Email that tried to log in.
        email: String,
        /// Why it was refused.
        reason: DenialReason,
    },

    /// A user tried to act on their own account.
    #[error("cannot perform this action on your own account")]
    SelfActionBlocked,

    /// The actor lacks the administrative standing for the action.
    #[error("not authorized: {0}")]
    Forbidden(String),

    /// The target is not in a state the action applies to.
    #[error("cannot {action} {email}: status is {from}")]
    InvalidTransition {
        /// Attempted action.
        action: &'static str,
        /// Target email.
        email: String,
        /// Current status of the target.
        from: UserStatus,
    },

    /// The target is the configured owner and cannot lose access.
    #[error("{0} is the protected owner account")]
    ProtectedAccount(String),

    /// No user has the given ID.
    #[error("user not found: {0}")]
    NotFound(String),

    /// The user directory could not be read or written.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StorageError),

    /// The action succeeded but its audit entry could not be written.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;
