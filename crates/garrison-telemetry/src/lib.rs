//! Garrison Telemetry - logging setup for the console.
//!
//! Every crate logs through `tracing`; this crate installs the global
//! subscriber once at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use garrison_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), garrison_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("garrison_access=debug");
//! setup_logging(&config)?;
//! tracing::info!("console started");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
