//! Garrison Access - the access request workflow.
//!
//! A prospective user [registers](AccessControl::register) and waits as
//! `Pending`. An administrator either [approves](AccessControl::approve) them
//! with a role and a permission set, or [rejects](AccessControl::reject) them.
//! Approved users can later be [revoked](AccessControl::revoke). Rejected is
//! terminal.
//!
//! The [`UserDirectory`] keeps the configured [`OwnerBootstrap`] account
//! present and approved: every read repairs it if needed.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bootstrap;
mod directory;
mod error;
mod policy;
mod registration;
mod workflow;

pub use bootstrap::{OwnerBootstrap, OwnerRepair};
pub use directory::UserDirectory;
pub use error::{AccessError, AccessResult, DenialReason};
pub use policy::AdminPolicy;
pub use registration::Registration;
pub use workflow::AccessControl;
