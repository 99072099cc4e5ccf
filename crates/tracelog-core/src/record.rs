//! Trace records and call-site capture.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::path::Path;
use tracelog_types::{ErrorIdentity, TraceKind};

use crate::describe::{self, Loggable};

/// Source location of an emission call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    /// Base name of the source file
    pub file: String,
    /// Line number
    pub line: u32,
    /// Last two path segments of the enclosing function
    pub function: String,
}

impl Caller {
    /// Build a caller from `file!()`, `line!()` and a function path.
    ///
    /// Usually produced by the [`caller!`](crate::caller) macro.
    pub fn new(file: &str, line: u32, function: &str) -> Self {
        let file = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file);
        Self {
            file: file.to_string(),
            line,
            function: short_function(function),
        }
    }
}

/// Shorten `crate::module::Type::method` to `Type::method`.
///
/// Closure segments are dropped so that a call inside a closure reports the
/// function that contains it.
pub fn short_function(path: &str) -> String {
    let segments: Vec<&str> = path
        .split("::")
        .filter(|segment| !segment.is_empty() && *segment != "{{closure}}")
        .collect();
    match segments.len() {
        0 => String::new(),
        1 => segments[0].to_string(),
        n => segments[n - 2..].join("::"),
    }
}

/// Capture the current stack, cut to at most `limit` bytes.
pub fn capture_stack(limit: usize) -> String {
    let mut stack = Backtrace::force_capture().to_string();
    if stack.len() > limit {
        let mut end = limit;
        while !stack.is_char_boundary(end) {
            end -= 1;
        }
        stack.truncate(end);
    }
    stack
}

/// One logged event.
///
/// Records are built on the emitting thread and handed to the writer,
/// which consumes each exactly once. They are never mutated after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    /// Severity
    pub kind: TraceKind,
    /// Build tag of the running binary
    pub build: String,
    /// Process id of the emitter
    pub pid: u32,
    /// When the record was built
    pub time: DateTime<Local>,
    /// Where it was emitted
    pub caller: Caller,
    /// Stack snapshot; empty for Info and Warning
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stack: String,
    /// Associated error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorIdentity>,
    /// Payload values, already rendered
    pub data: Vec<String>,
}

impl TraceRecord {
    /// Build a record for `kind` at `caller`.
    pub fn capture(
        kind: TraceKind,
        build: &str,
        caller: Caller,
        error: Option<&dyn TraceError>,
        data: &[&dyn Loggable],
        stack_limit: usize,
    ) -> Self {
        let stack = if kind.captures_stack() {
            capture_stack(stack_limit)
        } else {
            String::new()
        };
        Self {
            kind,
            build: build.to_string(),
            pid: std::process::id(),
            time: Local::now(),
            caller,
            stack,
            error: error.map(|e| e.trace_identity()),
            data: describe::describe_all(data),
        }
    }
}

/// An error that can be attached to a trace record.
///
/// Every displayable type qualifies: concrete `std::error::Error` types,
/// `Box<dyn Error + Send + Sync>` and `anyhow::Error` alike. An
/// [`ErrorIdentity`] is kept as is; anything else is classified from its
/// text, so a boxed identity maps back to itself.
pub trait TraceError {
    /// Identity stored in the record.
    fn trace_identity(&self) -> ErrorIdentity;
}

impl<E: fmt::Display + 'static> TraceError for E {
    fn trace_identity(&self) -> ErrorIdentity {
        match (self as &dyn Any).downcast_ref::<ErrorIdentity>() {
            Some(identity) => identity.clone(),
            None => ErrorIdentity::parse(&self.to_string()),
        }
    }
}
