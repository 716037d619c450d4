//! Garrison Core - Foundation types for the Garrison personnel access console.
//!
//! This crate provides:
//! - Identifier and timestamp types shared by every other crate
//! - The [`User`] record with its rank, role, status and permission set
//! - The [`Report`] record and its typed variants
//! - Directory layout for the Garrison home ([`dirs::GarrisonHome`])
//!
//! Nothing here touches storage. Workflows in `garrison-access` and
//! `garrison-reports` own the state transitions; these are plain data.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod dirs;
pub mod error;
pub mod report;
pub mod types;
pub mod user;

pub use error::ParseError;
pub use report::{DisciplinaryDetails, Report, ReportStatus, ReportType};
pub use types::{AuditEntryId, ReportId, Timestamp, UserId};
pub use user::{Permission, Rank, Role, User, UserStatus};
