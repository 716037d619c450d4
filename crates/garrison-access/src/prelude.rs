//! Prelude module - commonly used types for convenient import.
//!
//! Use `use garrison_access::prelude::*;` to import all essential types.

pub use crate::{AccessError, AccessResult, DenialReason};

pub use crate::{AccessControl, AdminPolicy, OwnerBootstrap, Registration, UserDirectory};
