//! Config file discovery and layered loading.
//!
//! 1. Parse embedded `defaults.toml` → base
//! 2. Merge the user file: an explicit `--config` path, or
//!    `{garrison home}/config.toml` when present
//! 3. Fill unset fields from `GARRISON_*` environment variables
//! 4. Deserialize merged tree → [`Config`]
//! 5. Validate

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{deep_merge, fill_if_unset};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Environment variables consulted for unset fields: `(var, section, key)`.
const ENV_FALLBACKS: [(&str, &str, &str); 3] = [
    ("GARRISON_STORE_PATH", "storage", "path"),
    ("GARRISON_OWNER_EMAIL", "owner", "email"),
    ("GARRISON_LOG_LEVEL", "logging", "level"),
];

/// A loaded configuration and the files that contributed to it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged, validated configuration.
    pub config: Config,
    /// Files merged over the defaults, in order.
    pub loaded_files: Vec<String>,
}

/// Load configuration with layered precedence, reading the process
/// environment for fallbacks.
///
/// `home` is the Garrison home directory; `explicit` is a config file the
/// user named on the command line and must exist.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a file is unreadable, oversized or
/// malformed, or if the merged configuration fails validation.
pub fn load(home: Option<&Path>, explicit: Option<&Path>) -> ConfigResult<LoadedConfig> {
    load_with_env(home, explicit, &collect_env_vars())
}

/// [`load`] with an explicit environment map.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with_env(
    home: Option<&Path>,
    explicit: Option<&Path>,
    env: &HashMap<String, String>,
) -> ConfigResult<LoadedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;
    let mut loaded_files = Vec::new();

    let user_file = match (explicit, home) {
        (Some(path), _) => {
            let overlay = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            })?;
            Some((overlay, path.to_path_buf()))
        },
        (None, Some(home)) => {
            let path = home.join("config.toml");
            try_load_file(&path)?.map(|overlay| (overlay, path))
        },
        (None, None) => None,
    };
    if let Some((overlay, path)) = user_file {
        deep_merge(&mut merged, &overlay);
        info!(path = %path.display(), "loaded user config");
        loaded_files.push(path.display().to_string());
    }

    let env_count = apply_env_fallbacks(&mut merged, env);
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;
    Ok(LoadedConfig {
        config,
        loaded_files,
    })
}

/// Load a config from a specific file path (no layering, no environment).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let value = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
        path: path.display().to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    })?;
    let config: Config = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

/// The embedded defaults as a [`Config`].
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] if the embedded file is malformed.
pub fn defaults() -> ConfigResult<Config> {
    toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
        path: "<embedded defaults>".to_owned(),
        source: e,
    })
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("GARRISON_"))
        .collect()
}

/// Fill unset fields from the environment. Returns how many were applied.
fn apply_env_fallbacks(merged: &mut toml::Value, env: &HashMap<String, String>) -> usize {
    ENV_FALLBACKS
        .iter()
        .filter(|(var, section, key)| {
            env.get(*var)
                .filter(|v| !v.trim().is_empty())
                .is_some_and(|v| fill_if_unset(merged, section, key, v.trim()))
        })
        .count()
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(value))
}
