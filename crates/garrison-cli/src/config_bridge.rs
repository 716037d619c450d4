//! Bridge from `garrison_config::Config` to runtime types.

use garrison_config::Config;
use garrison_core::dirs::GarrisonHome;
use garrison_telemetry::{LogConfig, LogFormat};

/// Convert the `[logging]` section to a [`LogConfig`].
///
/// A `file` target writes daily-rotated files under the home `logs/`
/// directory.
#[must_use]
pub(crate) fn to_log_config(cfg: &Config, home: &GarrisonHome) -> LogConfig {
    let format = cfg
        .logging
        .format
        .parse::<LogFormat>()
        .unwrap_or_default();

    let mut log_config = LogConfig::new(&cfg.logging.level).with_format(format);
    match cfg.logging.target.to_lowercase().as_str() {
        "stdout" => log_config = log_config.with_target(garrison_telemetry::LogTarget::Stdout),
        "file" => log_config = log_config.with_file_logging(home.logs_dir()),
        _ => {},
    }

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    log_config
}
