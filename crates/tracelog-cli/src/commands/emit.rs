//! Emit a single record.

use anyhow::{Context, Result};
use tracelog_core::{format, LogConfig, LogService, OnEvent, TraceKind, TraceRecord};
use tracelog_types::ErrorIdentity;

pub fn execute(config: &LogConfig, kind: TraceKind, message: &[String], document: bool) -> Result<()> {
    let on_event: Option<OnEvent> = if document {
        Some(Box::new(|record: &TraceRecord| println!("{}", format::as_document(record))))
    } else {
        None
    };

    let log = LogService::new();
    log.start(config, on_event).context("Failed to start log service")?;

    let text = message.join(" ");
    match kind {
        TraceKind::Error => {
            let failure: Result<(), ErrorIdentity> = Err(ErrorIdentity::parse(&text));
            tracelog_core::check!(log, failure);
        }
        TraceKind::Warning => tracelog_core::warning!(log, text),
        TraceKind::Info => tracelog_core::info!(log, text),
        TraceKind::Debug => tracelog_core::debug!(log, text),
        // Fatal; unwinding drops the service, which drains it.
        TraceKind::Assert => tracelog_core::assert_that!(log, false, text),
    }

    log.close();
    Ok(())
}
