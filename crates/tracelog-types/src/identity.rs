//! Stable error identities and the registry that assigns them.
//!
//! Every recoverable failure a subsystem wants callers to branch on gets a
//! `(facility, code)` pair, registered once at start-up. The canonical text
//! form is `<facility>-<code>: <message>`, which [`ErrorIdentity::parse`]
//! turns back into an identity so that identities survive any boundary that
//! can only carry text.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use crate::errors::{TraceLogError, Result};

/// A classified error: a message scoped by facility and code.
///
/// Unclassified errors (anything mapped from text that does not carry the
/// canonical prefix) have an empty facility and code `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorIdentity {
    /// Short namespace, e.g. `crypto`
    pub facility: String,
    /// Code, unique within the facility
    pub code: u32,
    /// Human readable message without the prefix
    pub message: String,
}

impl ErrorIdentity {
    /// Build an identity without registering it.
    pub fn new(code: u32, facility: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            facility: facility.into(),
            code,
            message: message.into(),
        }
    }

    /// Wrap arbitrary text as an unclassified identity.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self {
            facility: String::new(),
            code: 0,
            message: message.into(),
        }
    }

    /// Whether this identity carries a facility and code.
    pub fn is_classified(&self) -> bool {
        !self.facility.is_empty()
    }

    /// The canonical `<facility>-<code>` prefix.
    pub fn prefix(&self) -> String {
        format!("{}-{}", self.facility, self.code)
    }

    /// Parse the canonical `<facility>-<code>: <message>` text.
    ///
    /// Text that does not have that shape becomes an unclassified identity
    /// holding the whole input as its message.
    pub fn parse(text: &str) -> Self {
        Self::parse_canonical(text).unwrap_or_else(|| Self::unclassified(text))
    }

    fn parse_canonical(text: &str) -> Option<Self> {
        let (prefix, message) = text.split_once(": ")?;
        let (facility, code) = prefix.rsplit_once('-')?;
        // A trailing '-' would mean a negative code; codes are unsigned.
        if facility.is_empty()
            || facility.ends_with('-')
            || facility.chars().any(char::is_whitespace)
        {
            return None;
        }
        let code = code.parse::<u32>().ok()?;
        Some(Self::new(code, facility, message))
    }
}

impl fmt::Display for ErrorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_classified() {
            write!(f, "{}-{}: {}", self.facility, self.code, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl Error for ErrorIdentity {}

impl FromStr for ErrorIdentity {
    type Err = TraceLogError;

    /// Strict parse: unlike [`ErrorIdentity::parse`], rejects text without
    /// the canonical prefix.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse_canonical(s).ok_or_else(|| {
            TraceLogError::Validation(format!("not a canonical error identity: {}", s))
        })
    }
}

/// Table of registered identities keyed by canonical prefix.
///
/// A process normally uses the global registry through [`register_error`];
/// separate instances are useful for tests and for embedding.
#[derive(Debug, Default)]
pub struct ErrorRegistry {
    table: Mutex<HashMap<String, ErrorIdentity>>,
}

impl ErrorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static ErrorRegistry {
        static INSTANCE: Lazy<ErrorRegistry> = Lazy::new(ErrorRegistry::new);
        &INSTANCE
    }

    /// Register an identity, failing if its prefix is already taken.
    pub fn try_register(
        &self,
        code: u32,
        facility: &str,
        message: &str,
    ) -> Result<ErrorIdentity> {
        let identity = ErrorIdentity::new(code, facility, message);
        let prefix = identity.prefix();

        let mut table = self.table.lock();
        if table.contains_key(&prefix) {
            return Err(TraceLogError::DuplicateIdentity { prefix });
        }
        table.insert(prefix, identity.clone());
        Ok(identity)
    }

    /// Register an identity.
    ///
    /// # Panics
    ///
    /// Panics if `(facility, code)` is already registered. Two subsystems
    /// colliding on an identity is a programming error found at start-up.
    pub fn register(&self, code: u32, facility: &str, message: &str) -> ErrorIdentity {
        match self.try_register(code, facility, message) {
            Ok(identity) => identity,
            Err(e) => panic!("{}", e),
        }
    }

    /// Look up a registered identity.
    pub fn lookup(&self, facility: &str, code: u32) -> Option<ErrorIdentity> {
        self.table.lock().get(&format!("{}-{}", facility, code)).cloned()
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map any error onto an identity.
    ///
    /// Identities are returned unchanged, errors whose text has the
    /// canonical shape are parsed, anything else becomes unclassified.
    pub fn map_error(&self, err: &(dyn Error + 'static)) -> ErrorIdentity {
        if let Some(identity) = err.downcast_ref::<ErrorIdentity>() {
            return identity.clone();
        }
        self.map_text(&err.to_string())
    }

    /// Map text onto an identity, preferring the registered entry.
    pub fn map_text(&self, text: &str) -> ErrorIdentity {
        let parsed = ErrorIdentity::parse(text);
        if parsed.is_classified() {
            if let Some(registered) = self.lookup(&parsed.facility, parsed.code) {
                return registered;
            }
        }
        parsed
    }
}

/// Register an identity in the global registry.
///
/// Call once per distinct error, at initialization time.
///
/// # Panics
///
/// Panics on a duplicate `(facility, code)`.
pub fn register_error(code: u32, facility: &str, message: &str) -> ErrorIdentity {
    ErrorRegistry::global().register(code, facility, message)
}

/// Register an identity in the global registry, returning duplicates as errors.
pub fn try_register_error(code: u32, facility: &str, message: &str) -> Result<ErrorIdentity> {
    ErrorRegistry::global().try_register(code, facility, message)
}

/// Map any error onto an identity using the global registry.
pub fn map_error(err: &(dyn Error + 'static)) -> ErrorIdentity {
    ErrorRegistry::global().map_error(err)
}
