//! Configuration loading for the log service.
//!
//! Values are resolved in this priority order:
//! 1. Environment variables (`TRACELOG_PATH`, `TRACELOG_BUILD`, `TRACELOG_CONSOLE`)
//! 2. Values loaded from a YAML file
//! 3. Default values
//!
//! ## Example
//!
//! ```no_run
//! use tracelog_core::config;
//!
//! let config = config::load(config::default_path())?;
//! println!("logging to {:?}", config.path);
//! # Ok::<(), tracelog_types::TraceLogError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracelog_types::{bail, LogConfig, Result, TraceLogError};

use crate::util::expand_path;

/// Overrides the log file; an empty value disables file output.
pub const ENV_PATH: &str = "TRACELOG_PATH";
/// Overrides the build tag.
pub const ENV_BUILD: &str = "TRACELOG_BUILD";
/// Overrides the console flag.
pub const ENV_CONSOLE: &str = "TRACELOG_CONSOLE";

/// Default location of the configuration file.
pub fn default_path() -> PathBuf {
    expand_path("~/.tracelog/config.yml")
}

/// Load configuration from `path`, then apply environment overrides.
///
/// A missing file is not an error; defaults are used instead.
pub fn load(path: impl AsRef<Path>) -> Result<LogConfig> {
    load_with(path, |key| std::env::var(key).ok())
}

/// Like [`load`], reading overrides through `lookup` instead of the process
/// environment.
pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<LogConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let path = expand_path(path);
    let mut config = if path.exists() {
        let content = fs::read_to_string(&path)
            .map_err(|e| TraceLogError::Config(format!("Failed to read config file: {}", e)))?;
        parse(&content)?
    } else {
        LogConfig::default()
    };

    apply_overrides(&mut config, lookup)?;
    validate(&config)?;
    Ok(config)
}

/// Parse a YAML document into a configuration.
pub fn parse(content: &str) -> Result<LogConfig> {
    if content.trim().is_empty() {
        return Ok(LogConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Apply environment-style overrides.
pub fn apply_overrides<F>(config: &mut LogConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_PATH) {
        config.path = if path.is_empty() {
            None
        } else {
            Some(expand_path(path))
        };
    }
    if let Some(build) = lookup(ENV_BUILD) {
        config.build = build;
    }
    if let Some(console) = lookup(ENV_CONSOLE) {
        config.console = parse_bool(ENV_CONSOLE, &console)?;
    }
    Ok(())
}

/// Reject configurations the service cannot run with.
pub fn validate(config: &LogConfig) -> Result<()> {
    if config.queue_capacity == 0 {
        bail!(Config, "queue_capacity must be at least 1");
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TraceLogError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}
