//! # Tracelog Types
//!
//! Core types shared across all tracelog crates.
//!
//! This crate provides the leaf building blocks of the logging service:
//!
//! - Stable `(facility, code)` error identities and the registry that hands them out
//! - The severity kinds a trace record can carry
//! - Serializable logging configuration
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use tracelog_types::{ErrorIdentity, ErrorRegistry};
//!
//! let registry = ErrorRegistry::new();
//! let invalid_key = registry.register(100, "crypto", "invalid key");
//! assert_eq!(invalid_key.to_string(), "crypto-100: invalid key");
//!
//! let mapped = ErrorIdentity::parse("crypto-100: invalid key");
//! assert_eq!(mapped, invalid_key);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod identity;
pub mod config;

// Re-export common types for convenience
pub use errors::{TraceLogError, Result};
pub use enums::TraceKind;
pub use identity::{map_error, register_error, try_register_error, ErrorIdentity, ErrorRegistry};
pub use config::LogConfig;
