//! Garrison Audit - the console's audit trail.
//!
//! Every sensitive action (registration, login, approval, report filing...)
//! is recorded as an [`AuditEntry`] and prepended to a single collection, so
//! reading the log yields the newest entry first. Entries are never edited
//! or removed.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use garrison_audit::{AuditAction, AuditLog};
//! use garrison_core::UserId;
//! use garrison_storage::{MemoryKvStore, ScopedKvStore};
//!
//! let scope = ScopedKvStore::new(Arc::new(MemoryKvStore::new()), "garrison").unwrap();
//! let log = AuditLog::new(scope);
//!
//! log.append(&UserId::new(), "a@x.mil", AuditAction::Login, "Logged in").await.unwrap();
//! assert_eq!(log.count().await.unwrap(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod entry;
mod error;
mod log;

pub use entry::{AuditAction, AuditEntry};
pub use error::{AuditError, AuditResult};
pub use log::AuditLog;
