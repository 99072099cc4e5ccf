//! Print the effective configuration.

use anyhow::Result;
use tracelog_core::LogConfig;

pub fn execute(config: &LogConfig) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
