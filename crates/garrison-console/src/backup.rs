//! Full data export.

use garrison_audit::AuditEntry;
use garrison_core::{Report, Timestamp, User};
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};

/// Everything in the store except the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    /// When the snapshot was taken.
    pub exported_at: Timestamp,
    /// Email of the exporting owner.
    pub exported_by: String,
    /// The user directory.
    pub users: Vec<User>,
    /// The report catalog, newest first.
    pub reports: Vec<Report>,
    /// The audit log, newest first.
    pub logs: Vec<AuditEntry>,
}

impl BackupSnapshot {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> ConsoleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConsoleError::Serialization(e.to_string()))
    }

    /// Parse a snapshot written by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Serialization`] for malformed input.
    pub fn from_json(json: &str) -> ConsoleResult<Self> {
        serde_json::from_str(json).map_err(|e| ConsoleError::Serialization(e.to_string()))
    }
}
