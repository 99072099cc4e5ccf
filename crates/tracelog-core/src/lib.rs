//! # Tracelog Core
//!
//! Asynchronous structured logging for processes with many concurrent
//! producers and a single writer.
//!
//! This crate provides:
//!
//! - **Log service**: one writer thread behind a bounded queue, fanning each
//!   record out to console, file and an optional callback
//! - **Trace records**: timestamp, kind, build tag, caller location, stack
//!   snapshot, classified error and payload
//! - **Formatting**: a single-line layout for files and terminals and an
//!   indented JSON document
//! - **Describe**: opt-in rendering of arbitrary values for log payloads
//! - **Configuration**: YAML file with environment overrides
//!
//! ## Example
//!
//! ```no_run
//! use tracelog_core::{LogService, LogConfig};
//! use tracelog_types::register_error;
//!
//! let log = LogService::new();
//! log.start(&LogConfig::new(None, "1.0", true), None)?;
//!
//! tracelog_core::info!(log, "hello", 42);
//!
//! let invalid_key = register_error(100, "crypto", "invalid key");
//! let result: Result<(), _> = Err(invalid_key);
//! if tracelog_core::check!(log, result, "while unsealing") {
//!     // handle the failure
//! }
//!
//! log.close();
//! # Ok::<(), tracelog_types::TraceLogError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod describe;
pub mod format;
pub mod record;
pub mod service;
pub mod term;
pub mod time;
pub mod util;
mod macros;

// Re-export commonly used items
pub use describe::{Fields, Loggable, Tag};
pub use record::{Caller, TraceError, TraceRecord};
pub use service::{LogService, OnEvent, ServiceState};
pub use tracelog_types::{ErrorIdentity, LogConfig, Result, TraceKind, TraceLogError};

/// Tracelog version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
