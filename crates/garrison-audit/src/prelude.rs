//! Prelude module - commonly used types for convenient import.
//!
//! Use `use garrison_audit::prelude::*;` to import all essential types.

// Errors
pub use crate::{AuditError, AuditResult};

// Entry types
pub use crate::{AuditAction, AuditEntry};

// Log
pub use crate::AuditLog;
