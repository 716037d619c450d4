//! Semantic checks on a merged [`Config`].

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Config, LoggingSection};

/// Validate a merged configuration.
///
/// # Errors
///
/// Returns the first [`ConfigError::ValidationError`] found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_storage(config)?;
    validate_owner(config)?;
    validate_audit(config)?;
    validate_logging(&config.logging)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_storage(config: &Config) -> ConfigResult<()> {
    config.storage.backend()?;
    let ns = &config.storage.namespace;
    if ns.trim().is_empty() {
        return Err(invalid("storage.namespace", "must not be empty"));
    }
    if ns.contains('\0') {
        return Err(invalid("storage.namespace", "must not contain null bytes"));
    }
    Ok(())
}

fn validate_owner(config: &Config) -> ConfigResult<()> {
    let owner = &config.owner;
    if !owner.is_configured() {
        if config.access.enforce_admin_role {
            return Err(invalid(
                "owner.email",
                "required while access.enforce_admin_role is on \
                 (set [owner] email or GARRISON_OWNER_EMAIL)",
            ));
        }
        return Ok(());
    }
    if !owner.email.contains('@') {
        return Err(invalid(
            "owner.email",
            format!("'{}' is not an email address", owner.email),
        ));
    }
    if !owner.rank.is_assigned() {
        return Err(invalid("owner.rank", "an owner needs a rank"));
    }
    if owner.display_name.trim().is_empty() {
        return Err(invalid("owner.display_name", "must not be empty"));
    }
    Ok(())
}

fn validate_audit(config: &Config) -> ConfigResult<()> {
    if config.audit.recent_limit == 0 {
        return Err(invalid("audit.recent_limit", "must be greater than 0"));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingSection) -> ConfigResult<()> {
    let check = |field: &str, value: &str, allowed: &[&str]| {
        if allowed.contains(&value.to_lowercase().as_str()) {
            Ok(())
        } else {
            Err(invalid(
                field,
                format!("'{value}' is not one of {allowed:?}"),
            ))
        }
    };
    check("logging.level", &logging.level, &LoggingSection::LEVELS)?;
    check("logging.format", &logging.format, &LoggingSection::FORMATS)?;
    check("logging.target", &logging.target, &LoggingSection::TARGETS)?;
    Ok(())
}
