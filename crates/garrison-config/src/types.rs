//! Configuration types.

use std::path::PathBuf;

use garrison_core::Rank;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how data is stored.
    pub storage: StorageSection,
    /// Seed owner account.
    pub owner: OwnerSection,
    /// Review permissions.
    pub access: AccessSection,
    /// Audit log display.
    pub audit: AuditSection,
    /// Log output.
    pub logging: LoggingSection,
}

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Embedded on-disk `SurrealKV`.
    SurrealKv,
    /// In-memory, lost on exit.
    Memory,
}

impl StorageBackend {
    /// Accepted spellings, as written in TOML.
    pub const NAMES: [&'static str; 2] = ["surrealkv", "memory"];
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// `"surrealkv"` or `"memory"`.
    pub backend: String,
    /// Store directory. Empty means the default under the Garrison home.
    pub path: String,
    /// Key namespace.
    pub namespace: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: "surrealkv".into(),
            path: String::new(),
            namespace: "garrison".into(),
        }
    }
}

impl StorageSection {
    /// Parsed backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an unknown name.
    pub fn backend(&self) -> ConfigResult<StorageBackend> {
        match self.backend.trim().to_lowercase().as_str() {
            "surrealkv" => Ok(StorageBackend::SurrealKv),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::ValidationError {
                field: "storage.backend".into(),
                message: format!(
                    "unknown backend '{other}', expected one of {:?}",
                    StorageBackend::NAMES
                ),
            }),
        }
    }

    /// Explicit store path, if one was configured.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        let p = self.path.trim();
        (!p.is_empty()).then(|| PathBuf::from(p))
    }
}

/// `[owner]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerSection {
    /// Owner email. Empty disables the seed owner.
    pub email: String,
    /// Owner war name.
    pub display_name: String,
    /// Owner rank.
    pub rank: Rank,
    /// Owner command.
    pub command: String,
}

impl Default for OwnerSection {
    fn default() -> Self {
        Self {
            email: String::new(),
            display_name: "OWNER".into(),
            rank: Rank::Colonel,
            command: "COMGEP".into(),
        }
    }
}

impl OwnerSection {
    /// Whether a seed owner is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

/// `[access]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSection {
    /// Require an approved administrator for review actions.
    pub enforce_admin_role: bool,
}

impl Default for AccessSection {
    fn default() -> Self {
        Self {
            enforce_admin_role: true,
        }
    }
}

/// `[audit]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSection {
    /// Default number of entries to show.
    pub recent_limit: usize,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self { recent_limit: 15 }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Level filter (`trace`..`error`).
    pub level: String,
    /// `pretty`, `compact`, `json` or `full`.
    pub format: String,
    /// `stderr`, `stdout` or `file`.
    pub target: String,
    /// Extra `EnvFilter` directives, e.g. `garrison_access=debug`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "compact".into(),
            target: "stderr".into(),
            directives: Vec::new(),
        }
    }
}

impl LoggingSection {
    /// Accepted `format` values.
    pub const FORMATS: [&'static str; 4] = ["pretty", "compact", "json", "full"];
    /// Accepted `target` values.
    pub const TARGETS: [&'static str; 3] = ["stderr", "stdout", "file"];
    /// Accepted `level` values.
    pub const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];
}
