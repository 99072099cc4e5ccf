//! Severity kinds carried by trace records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{TraceLogError, Result};

/// The kind of event a trace record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    /// Broken invariant; never queued, always fatal
    Assert,
    /// Recoverable failure reported through `check`/`fail`
    Error,
    /// Development aid; always echoed to the console
    Debug,
    /// Informational message
    Info,
    /// Something unexpected but not failing
    Warning,
}

impl TraceKind {
    /// Whether records of this kind carry a stack snapshot.
    ///
    /// Info and Warning skip the capture; they are the high-volume kinds.
    pub fn captures_stack(self) -> bool {
        matches!(self, TraceKind::Assert | TraceKind::Error | TraceKind::Debug)
    }

    /// Lower-case name used in formatted output.
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Assert => "assert",
            TraceKind::Error => "error",
            TraceKind::Debug => "debug",
            TraceKind::Info => "info",
            TraceKind::Warning => "warning",
        }
    }
}

impl FromStr for TraceKind {
    type Err = TraceLogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "assert" => Ok(TraceKind::Assert),
            "error" => Ok(TraceKind::Error),
            "debug" => Ok(TraceKind::Debug),
            "info" => Ok(TraceKind::Info),
            "warn" | "warning" => Ok(TraceKind::Warning),
            _ => Err(TraceLogError::Validation(format!("Invalid trace kind: {}", s))),
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            TraceKind::Assert,
            TraceKind::Error,
            TraceKind::Debug,
            TraceKind::Info,
            TraceKind::Warning,
        ] {
            assert_eq!(kind.to_string().parse::<TraceKind>().unwrap(), kind);
        }
        assert_eq!("WARN".parse::<TraceKind>().unwrap(), TraceKind::Warning);
        assert!("fatal".parse::<TraceKind>().is_err());
    }

    #[test]
    fn test_stack_capture_kinds() {
        assert!(TraceKind::Assert.captures_stack());
        assert!(TraceKind::Error.captures_stack());
        assert!(TraceKind::Debug.captures_stack());
        assert!(!TraceKind::Info.captures_stack());
        assert!(!TraceKind::Warning.captures_stack());
    }
}
