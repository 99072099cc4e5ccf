//! Rendering of trace records.
//!
//! Two layouts are produced:
//!
//! - [`as_line`]: one line per record, used for the console and the log file
//!
//!   ```text
//!   MM/DD/YYYY HH:MM:SS: [kind] build(pid): file(line): function: error: payload
//!   ```
//!
//!   The `error: ` segment only appears when the record carries an error.
//!
//! - [`as_document`]: indented JSON of every field, including the stack
//!   snapshot, for callbacks and postmortem tooling.

use crate::record::TraceRecord;
use crate::time;

/// Render a record as a single line.
pub fn as_line(record: &TraceRecord) -> String {
    let source = format!(
        "{}({}): {}({}): {}",
        record.build, record.pid, record.caller.file, record.caller.line, record.caller.function
    );
    let mut message = record.data.join(", ");
    if let Some(error) = &record.error {
        message = format!("{}: {}", error, message);
    }
    format!(
        "{}: [{}] {}: {}",
        time::line_stamp(&record.time),
        record.kind,
        source,
        message
    )
}

/// Render a record as an indented JSON document.
pub fn as_document(record: &TraceRecord) -> String {
    serde_json::to_string_pretty(record)
        .unwrap_or_else(|e| format!("error-converting: {:?}: {}", record, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Caller;
    use chrono::{Local, TimeZone};
    use tracelog_types::{ErrorIdentity, TraceKind};

    fn record(kind: TraceKind, error: Option<ErrorIdentity>, data: &[&str]) -> TraceRecord {
        TraceRecord {
            kind,
            build: "1.0".to_string(),
            pid: 4711,
            time: Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap(),
            caller: Caller::new("src/vault.rs", 88, "app::vault::unseal"),
            stack: String::new(),
            error,
            data: data.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_line_without_error() {
        let line = as_line(&record(TraceKind::Info, None, &["hello", "42"]));
        assert_eq!(
            line,
            "03/07/2024 09:05:01: [info] 1.0(4711): vault.rs(88): vault::unseal: hello, 42"
        );
    }

    #[test]
    fn test_line_with_error() {
        let error = ErrorIdentity::new(100, "crypto", "invalid key");
        let line = as_line(&record(TraceKind::Error, Some(error), &["retrying"]));
        assert_eq!(
            line,
            "03/07/2024 09:05:01: [error] 1.0(4711): vault.rs(88): vault::unseal: \
             crypto-100: invalid key: retrying"
        );
    }

    #[test]
    fn test_document() {
        let error = ErrorIdentity::new(100, "crypto", "invalid key");
        let doc = as_document(&record(TraceKind::Warning, Some(error), &["a"]));
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["kind"], "warning");
        assert_eq!(value["build"], "1.0");
        assert_eq!(value["caller"]["line"], 88);
        assert_eq!(value["error"]["facility"], "crypto");
        assert_eq!(value["data"][0], "a");
        assert!(value.get("stack").is_none());
        assert!(doc.contains('\n'));
    }
}
