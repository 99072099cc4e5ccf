//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file; `None` means console/callback-only logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Build tag identifying the running binary
    #[serde(default)]
    pub build: String,
    /// Whether non-debug records are echoed to the console
    #[serde(default = "default_console")]
    pub console: bool,
    /// Records the queue holds before producers block
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Byte budget for stack snapshots
    #[serde(default = "default_stack_limit")]
    pub stack_limit: usize,
}

fn default_console() -> bool {
    true
}

fn default_queue_capacity() -> usize {
    100
}

fn default_stack_limit() -> usize {
    1024
}

impl LogConfig {
    /// Configuration with the given file, build tag and console flag.
    pub fn new(path: Option<PathBuf>, build: impl Into<String>, console: bool) -> Self {
        Self {
            path,
            build: build.into(),
            console,
            ..Self::default()
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            build: String::new(),
            console: default_console(),
            queue_capacity: default_queue_capacity(),
            stack_limit: default_stack_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_partial_yaml() {
        let config: LogConfig = serde_yaml::from_str("build: \"2.1\"\n").unwrap();
        assert_eq!(config.build, "2.1");
        assert!(config.console);
        assert_eq!(config.path, None);
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.stack_limit, 1024);
    }
}
