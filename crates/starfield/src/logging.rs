//! File logging setup.
//!
//! The terminal belongs to the animation, so log records go to a file and
//! only when a filter is configured.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr, eyre};
use starfield_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "STARFIELD_LOG";

/// Install a file-backed `tracing` subscriber if logging is enabled.
/// Returns whether a subscriber was installed.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let Some(filter) = std::env::var(LOG_ENV).ok().or_else(|| config.level.clone()) else {
        return Ok(false);
    };
    let filter = EnvFilter::try_new(&filter)
        .wrap_err_with(|| format!("invalid log filter {filter:?}"))?;

    let path = config
        .file_path()
        .ok_or_else(|| eyre!("no log file configured and no data directory available"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_level() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert!(!init(&LoggingConfig::default()).unwrap());
    }

    #[test]
    fn test_rejects_bad_filter() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        let config = LoggingConfig {
            level: Some("starfield=notalevel".into()),
            file: None,
        };
        assert!(init(&config).is_err());
    }
}
