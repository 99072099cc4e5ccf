//! CLI structure and command definitions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracelog_core::{config, term, LogConfig, TraceKind};

use crate::commands;

#[derive(Parser)]
#[command(name = "tracelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Asynchronous structured logging service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ~/.tracelog/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose diagnostics from the service itself
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit one record through the log service
    Emit {
        /// Record kind (error, warning, info, debug, assert)
        #[arg(short, long, default_value = "info")]
        kind: TraceKind,

        /// Log file to write (overrides configuration)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Build tag (overrides configuration)
        #[arg(short, long)]
        build: Option<String>,

        /// Do not echo non-debug records to the console
        #[arg(short, long)]
        quiet: bool,

        /// Also print each record as a JSON document
        #[arg(long)]
        document: bool,

        /// Payload values
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Run concurrent producers against a log file and verify every record landed
    Stress {
        /// Number of producer threads
        #[arg(short, long, default_value_t = 4)]
        producers: usize,

        /// Records per producer
        #[arg(short = 'n', long, default_value_t = 1000)]
        count: usize,

        /// Log file to write
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Map error text onto a registered or parsed identity
    #[command(name = "map-error")]
    MapError {
        /// Text such as "crypto-100: invalid key"
        text: String,
    },

    /// Show the effective configuration
    Config,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        if self.no_color || !term::in_controlling_terminal() {
            term::set_colors(false);
        }

        let path = self.config.clone().unwrap_or_else(config::default_path);
        let loaded = config::load(&path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?;

        match self.command {
            Commands::Emit {
                kind,
                file,
                build,
                quiet,
                document,
                message,
            } => {
                let config = LogConfig {
                    path: file.or(loaded.path.clone()),
                    build: build.unwrap_or_else(|| loaded.build.clone()),
                    console: loaded.console && !quiet,
                    ..loaded
                };
                commands::emit::execute(&config, kind, &message, document)
            }
            Commands::Stress {
                producers,
                count,
                file,
            } => {
                let config = LogConfig {
                    path: Some(file),
                    console: false,
                    ..loaded
                };
                commands::stress::execute(&config, producers, count)
            }
            Commands::MapError { text } => commands::map_error::execute(&text),
            Commands::Config => commands::show_config::execute(&loaded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_emit() {
        let cli = Cli::try_parse_from(["tracelog", "emit", "-k", "warning", "disk", "almost", "full"])
            .unwrap();
        match cli.command {
            Commands::Emit { kind, message, .. } => {
                assert_eq!(kind, TraceKind::Warning);
                assert_eq!(message, vec!["disk", "almost", "full"]);
            }
            _ => panic!("expected emit"),
        }
        assert!(Cli::try_parse_from(["tracelog", "emit", "-k", "fatal", "x"]).is_err());
    }

    #[test]
    fn test_stress_writes_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("stress.log");
        let config_file = dir.path().join("absent.yml");
        let args: Vec<OsString> = vec![
            "tracelog".into(),
            "stress".into(),
            "-p".into(),
            "3".into(),
            "-n".into(),
            "25".into(),
            "-f".into(),
            log_file.into_os_string(),
            "-c".into(),
            config_file.into_os_string(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        cli.execute().unwrap();

        let content = std::fs::read_to_string(dir.path().join("stress.log")).unwrap();
        assert_eq!(content.lines().count(), 75);
        assert!(content.contains("[producer: 2]"));
    }
}
