//! Audit entry types and action tags.

use std::fmt;

use garrison_core::{AuditEntryId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A single audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry identifier.
    pub id: AuditEntryId,
    /// User who performed the action.
    pub actor_id: UserId,
    /// Email of that user at the time of the action.
    pub actor_email: String,
    /// When the entry was recorded.
    pub timestamp: Timestamp,
    /// What happened.
    pub action: AuditAction,
    /// Human-readable detail.
    pub detail: String,
}

impl AuditEntry {
    /// Create an entry stamped with a fresh ID and the current time.
    #[must_use]
    pub fn new(
        actor_id: UserId,
        actor_email: impl Into<String>,
        action: AuditAction,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            actor_id,
            actor_email: actor_email.into(),
            timestamp: Timestamp::now(),
            action,
            detail: detail.into(),
        }
    }
}

/// Short tag naming the audited action.
///
/// Serialized as the bare tag string (`"APPROVE_USER"`), so any tag written
/// by another tool round-trips as [`AuditAction::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    /// A new account was requested.
    Register,
    /// A user logged in.
    Login,
    /// A user logged out.
    Logout,
    /// A pending user was approved.
    ApproveUser,
    /// A pending user was rejected.
    RejectUser,
    /// An approved user's access was revoked.
    RevokeUser,
    /// A report was filed.
    ReportCreate,
    /// The configured owner account was repaired.
    OwnerRestored,
    /// A backup snapshot was exported.
    BackupExport,
    /// Any other tag.
    Custom(String),
}

impl AuditAction {
    /// Every built-in tag.
    pub const KNOWN: [AuditAction; 9] = [
        Self::Register,
        Self::Login,
        Self::Logout,
        Self::ApproveUser,
        Self::RejectUser,
        Self::RevokeUser,
        Self::ReportCreate,
        Self::OwnerRestored,
        Self::BackupExport,
    ];

    /// The tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Register => "REGISTER",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::ApproveUser => "APPROVE_USER",
            Self::RejectUser => "REJECT_USER",
            Self::RevokeUser => "REVOKE_USER",
            Self::ReportCreate => "REPORT_CREATE",
            Self::OwnerRestored => "OWNER_RESTORED",
            Self::BackupExport => "BACKUP_EXPORT",
            Self::Custom(tag) => tag,
        }
    }

    /// Whether this is one of the built-in tags.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<String> for AuditAction {
    fn from(tag: String) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|a| a.as_str() == tag)
            .unwrap_or(Self::Custom(tag))
    }
}

impl From<&str> for AuditAction {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        match action {
            AuditAction::Custom(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
