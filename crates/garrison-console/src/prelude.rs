//! Prelude module - commonly used types for convenient import.
//!
//! Use `use garrison_console::prelude::*;` to import all essential types.

pub use crate::{ConsoleError, ConsoleResult};

pub use crate::{BackupSnapshot, Console, ConsoleSettings, DashboardSummary, Session, View};
