//! Directory layout for the Garrison home.
//!
//! ```text
//! ~/.garrison/                    (GarrisonHome, or $GARRISON_HOME)
//! ├── config.toml                   (user configuration)
//! ├── store.db/                     (SurrealKV: users, reports, logs, session)
//! ├── logs/                         (rolling log files)
//! └── backups/                      (JSON exports)
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the home directory.
pub const HOME_ENV: &str = "GARRISON_HOME";

/// Global Garrison home directory (`~/.garrison/` or `$GARRISON_HOME`).
#[derive(Debug, Clone)]
pub struct GarrisonHome {
    root: PathBuf,
}

impl GarrisonHome {
    /// Resolve the home directory.
    ///
    /// Checks `$GARRISON_HOME` first, then falls back to `~/.garrison/`.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined, or if
    /// `$GARRISON_HOME` is not an absolute path.
    pub fn resolve() -> io::Result<Self> {
        let custom = std::env::var(HOME_ENV).ok();
        let home = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());
        Self::resolve_from(custom.as_deref(), home.as_deref())
    }

    /// Resolve from an explicit `$GARRISON_HOME` value and user home directory.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_from(custom: Option<&str>, home: Option<&Path>) -> io::Result<Self> {
        if let Some(custom) = custom {
            let p = PathBuf::from(custom);
            if !p.is_absolute() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "GARRISON_HOME must be an absolute path",
                ));
            }
            return Ok(Self { root: p });
        }

        let home = home.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "GARRISON_HOME is not set and no home directory was found",
            )
        })?;
        Ok(Self {
            root: home.join(".garrison"),
        })
    }

    /// Create from an explicit path (useful for testing).
    #[must_use]
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the directory structure exists with owner-only permissions.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or permission setting fails.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.logs_dir())?;
        std::fs::create_dir_all(self.backups_dir())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(self.root(), perms.clone())?;
            std::fs::set_permissions(self.logs_dir(), perms.clone())?;
            std::fs::set_permissions(self.backups_dir(), perms)?;
        }
        Ok(())
    }

    /// Root directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the user configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to the store directory (`SurrealKV`).
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.root.join("store.db")
    }

    /// Logs directory.
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Backup exports directory.
    #[must_use]
    pub fn backups_dir(&self) -> PathBuf {
        self.root.join("backups")
    }
}
