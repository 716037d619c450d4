//! Garrison Reports - the operational report catalog.
//!
//! Reports are filed through [`ReportCatalog::create`] from a [`NewReport`]
//! and kept newest first. Listing can be narrowed to one
//! [`ReportType`](garrison_core::ReportType).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod catalog;
mod draft;
mod error;

pub use catalog::ReportCatalog;
pub use draft::NewReport;
pub use error::{ReportError, ReportResult};
