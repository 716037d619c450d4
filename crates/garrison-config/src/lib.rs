//! Garrison Config - layered TOML configuration.
//!
//! Precedence, lowest to highest:
//!
//! 1. Embedded defaults (`defaults.toml`)
//! 2. `{garrison home}/config.toml`, or a file named with `--config`
//! 3. `GARRISON_STORE_PATH`, `GARRISON_OWNER_EMAIL`, `GARRISON_LOG_LEVEL`,
//!    applied only to fields still unset after step 2
//!
//! The merged tree is validated before it is returned.
//!
//! # Example
//!
//! ```rust,no_run
//! let loaded = garrison_config::load(None, None).unwrap();
//! println!("namespace: {}", loaded.config.storage.namespace);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod loader;
mod merge;
mod types;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{LoadedConfig, defaults, load, load_file, load_with_env};
pub use types::{
    AccessSection, AuditSection, Config, LoggingSection, OwnerSection, StorageBackend,
    StorageSection,
};
pub use validate::validate;
