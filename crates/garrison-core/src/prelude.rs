//! Prelude module - commonly used types for convenient import.
//!
//! Use `use garrison_core::prelude::*;` to import all essential types.

// Identifiers and time
pub use crate::{AuditEntryId, ReportId, Timestamp, UserId};

// Users
pub use crate::{Permission, Rank, Role, User, UserStatus};

// Reports
pub use crate::{DisciplinaryDetails, Report, ReportStatus, ReportType};

// Errors
pub use crate::ParseError;
