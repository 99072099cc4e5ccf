//! Error types for tracelog operations.

use thiserror::Error;

/// The main error type for tracelog operations.
///
/// This covers the failures the logging service itself can run into. Errors
/// that callers *log* are not represented here; those are any
/// `std::error::Error`, optionally classified by an
/// [`ErrorIdentity`](crate::ErrorIdentity).
#[derive(Error, Debug)]
pub enum TraceLogError {
    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// An error identity was registered twice
    #[error("duplicate error identity: {prefix}")]
    DuplicateIdentity {
        /// Canonical `<facility>-<code>` prefix that collided
        prefix: String,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for tracelog operations.
pub type Result<T> = std::result::Result<T, TraceLogError>;

/// Helper macro to bail out with a TraceLogError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if capacity == 0 {
///     bail!(Config, "queue capacity must be at least 1");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::TraceLogError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::TraceLogError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::TraceLogError::Other($msg.to_string()))
    };
}
