use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a file-backed tracing subscriber. The terminal belongs to the UI,
/// so nothing is ever written to stdout or stderr.
///
/// Filter precedence: `level_override`, then `RUST_LOG`, then the config.
pub fn init(config: &LoggingConfig, level_override: Option<&str>) -> Result<()> {
    let Some(path) = config.file_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = build_filter(&config.level, level_override)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(())
}

fn build_filter(config_level: &str, level_override: Option<&str>) -> Result<EnvFilter> {
    let config_filter = EnvFilter::try_new(config_level)
        .with_context(|| format!("Invalid [logging] level in config: {}", config_level))?;

    if let Some(level) = level_override {
        return EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {}", level));
    }

    Ok(EnvFilter::try_from_default_env().unwrap_or(config_filter))
}
