//! Garrison Console - the logged-in surface of the admin console.
//!
//! [`Console`] wires the store, audit log, access workflow and report
//! catalog behind an explicit [`Session`]. Every call past registration and
//! login acts as the session user and fails with
//! [`ConsoleError::NotLoggedIn`] when there is none.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use garrison_access::OwnerBootstrap;
//! use garrison_console::{Console, ConsoleSettings, View};
//! use garrison_core::Rank;
//! use garrison_storage::MemoryKvStore;
//!
//! let settings = ConsoleSettings {
//!     owner: Some(OwnerBootstrap::new("chief@x.mil", "CHIEF", Rank::Colonel, "COMGEP")),
//!     ..ConsoleSettings::default()
//! };
//! let mut console = Console::open(Arc::new(MemoryKvStore::new()), settings).await?;
//! console.login("chief@x.mil").await?;
//! assert_eq!(console.route(View::Approvals)?, View::Approvals);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod backup;
mod console;
mod dashboard;
mod error;
mod session;
mod views;

pub use backup::BackupSnapshot;
pub use console::{Console, ConsoleSettings};
pub use dashboard::DashboardSummary;
pub use error::{ConsoleError, ConsoleResult};
pub use session::Session;
pub use views::View;
