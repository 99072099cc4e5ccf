//! The log service: many producers, one writer.
//!
//! A [`LogService`] is constructed explicitly and handed (it is a cheap
//! clone) to whatever needs to emit events. `start` opens the log file on
//! the caller's thread and spawns a single writer thread that owns the file,
//! the console output and the callback. Producers push records into a
//! bounded queue; a full queue blocks the producer until the writer catches
//! up. `close` signals the writer, which drains whatever is still queued
//! before releasing the file.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --start--> Running --close--> Draining --> Closed
//!                             ^                              |
//!                             +------------start-------------+
//! ```
//!
//! Emitting while not running drops the record. `start` and `close` called
//! while another `close` is draining wait until the drain has finished.
//! `assert_at` never touches the queue: it formats on the calling thread and
//! panics.

use parking_lot::{Condvar, Mutex, MutexGuard};
use std::fmt;
use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracelog_types::{bail, LogConfig, Result, TraceKind};

use crate::describe::Loggable;
use crate::format;
use crate::record::{Caller, TraceError, TraceRecord};
use crate::term;
use crate::util::fs;

/// Callback invoked on the writer thread after each record is written.
///
/// It must not block indefinitely and must not emit through the same
/// service; either stalls the whole pipeline.
pub type OnEvent = Box<dyn Fn(&TraceRecord) + Send + 'static>;

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Never started, or the last start failed
    Uninitialized,
    /// Writer thread is accepting records
    Running,
    /// Writer is flushing queued records before shutting down
    Draining,
    /// Shut down; may be started again
    Closed,
}

enum Envelope {
    Record(TraceRecord),
    Exit,
}

struct Running {
    queue: SyncSender<Envelope>,
    writer: JoinHandle<()>,
    build: String,
    stack_limit: usize,
}

enum Lifecycle {
    Uninitialized,
    Running(Running),
    Draining,
    Closed,
}

struct Inner {
    lifecycle: Mutex<Lifecycle>,
    /// Signalled when a drain finishes.
    settled: Condvar,
}

/// Handle to the asynchronous log service.
#[derive(Clone)]
pub struct LogService {
    inner: Arc<Inner>,
}

impl LogService {
    /// Create a service in the `Uninitialized` state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                lifecycle: Mutex::new(Lifecycle::Uninitialized),
                settled: Condvar::new(),
            }),
        }
    }

    /// Start the writer thread.
    ///
    /// Does nothing if the service is already running. If a `close` is still
    /// draining, waits for it and then starts. The log file, when
    /// configured, is created or truncated before this returns; if that
    /// fails the error is returned and no writer thread is left behind.
    ///
    /// Must not be called from the `on_event` callback.
    pub fn start(&self, config: &LogConfig, on_event: Option<OnEvent>) -> Result<()> {
        let mut lifecycle = self.inner.settle();
        if matches!(*lifecycle, Lifecycle::Running(_)) {
            tracing::debug!("log service already running; start ignored");
            return Ok(());
        }
        if config.queue_capacity == 0 {
            bail!(Config, "queue capacity must be at least 1");
        }

        let file = match config.path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Some(LineWriter::new(fs::open_truncated(path)?)),
            None => None,
        };

        let (queue, records) = mpsc::sync_channel(config.queue_capacity);
        let sink = Sink {
            console: config.console,
            file,
            on_event,
        };
        let writer = thread::Builder::new()
            .name("tracelog-writer".to_string())
            .spawn(move || sink.run(records))?;

        tracing::debug!(
            build = %config.build,
            path = ?config.path,
            capacity = config.queue_capacity,
            "log service started"
        );
        *lifecycle = Lifecycle::Running(Running {
            queue,
            writer,
            build: config.build.clone(),
            stack_limit: config.stack_limit,
        });
        Ok(())
    }

    /// Stop the writer after it has drained every queued record.
    ///
    /// Safe to call repeatedly and on a service that never started. A call
    /// that overlaps another `close` returns once that drain has finished.
    /// Must not be called from the `on_event` callback.
    pub fn close(&self) {
        self.inner.close();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        match *self.inner.lifecycle.lock() {
            Lifecycle::Uninitialized => ServiceState::Uninitialized,
            Lifecycle::Running(_) => ServiceState::Running,
            Lifecycle::Draining => ServiceState::Draining,
            Lifecycle::Closed => ServiceState::Closed,
        }
    }

    /// Whether records are currently being accepted.
    pub fn is_running(&self) -> bool {
        self.state() == ServiceState::Running
    }

    /// Log `result`'s error, if any. Returns `true` iff it was an error.
    ///
    /// No record is built for `Ok`. Any [`TraceError`] is accepted, including
    /// `Box<dyn Error + Send + Sync>` and `anyhow::Error`.
    pub fn check_at<T, E>(
        &self,
        caller: Caller,
        result: &std::result::Result<T, E>,
        data: &[&dyn Loggable],
    ) -> bool
    where
        E: TraceError,
    {
        match result {
            Ok(_) => false,
            Err(e) => {
                self.emit(TraceKind::Error, caller, Some(e), data);
                true
            }
        }
    }

    /// Log `result`'s error, if any, and hand `result` back unchanged.
    pub fn fail_at<T, E>(
        &self,
        caller: Caller,
        result: std::result::Result<T, E>,
        data: &[&dyn Loggable],
    ) -> std::result::Result<T, E>
    where
        E: TraceError,
    {
        if let Err(e) = &result {
            self.emit(TraceKind::Error, caller, Some(e), data);
        }
        result
    }

    /// Panic with the formatted record if `condition` is false.
    ///
    /// The record is never queued; nothing reaches the console, file or
    /// callback through the writer.
    pub fn assert_at(&self, caller: Caller, condition: bool, data: &[&dyn Loggable]) {
        if condition {
            return;
        }
        let (build, stack_limit) = match &*self.inner.lifecycle.lock() {
            Lifecycle::Running(running) => (running.build.clone(), running.stack_limit),
            _ => (String::new(), LogConfig::default().stack_limit),
        };
        let record =
            TraceRecord::capture(TraceKind::Assert, &build, caller, None, data, stack_limit);
        panic!("assertion failed: {}", format::as_line(&record));
    }

    /// Log a warning.
    pub fn warning_at(&self, caller: Caller, data: &[&dyn Loggable]) {
        self.emit(TraceKind::Warning, caller, None, data);
    }

    /// Log an informational message.
    pub fn info_at(&self, caller: Caller, data: &[&dyn Loggable]) {
        self.emit(TraceKind::Info, caller, None, data);
    }

    /// Log a debug message.
    pub fn debug_at(&self, caller: Caller, data: &[&dyn Loggable]) {
        self.emit(TraceKind::Debug, caller, None, data);
    }

    fn emit(
        &self,
        kind: TraceKind,
        caller: Caller,
        error: Option<&dyn TraceError>,
        data: &[&dyn Loggable],
    ) {
        let (queue, build, stack_limit) = match &*self.inner.lifecycle.lock() {
            Lifecycle::Running(running) => (
                running.queue.clone(),
                running.build.clone(),
                running.stack_limit,
            ),
            _ => {
                tracing::trace!(%kind, "log service not running; record dropped");
                return;
            }
        };

        let record = TraceRecord::capture(kind, &build, caller, error, data, stack_limit);
        // Blocks while the queue is full.
        if queue.send(Envelope::Record(record)).is_err() {
            tracing::trace!(%kind, "log writer gone; record dropped");
        }
    }
}

impl Default for LogService {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogService")
            .field("state", &self.state())
            .finish()
    }
}

impl Inner {
    /// Lock the lifecycle once no drain is in progress.
    fn settle(&self) -> MutexGuard<'_, Lifecycle> {
        let mut lifecycle = self.lifecycle.lock();
        while matches!(*lifecycle, Lifecycle::Draining) {
            self.settled.wait(&mut lifecycle);
        }
        lifecycle
    }

    fn close(&self) {
        let running = {
            let mut lifecycle = self.settle();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Draining) {
                Lifecycle::Running(running) => running,
                other => {
                    *lifecycle = other;
                    return;
                }
            }
        };

        let Running { queue, writer, .. } = running;
        if queue.send(Envelope::Exit).is_err() {
            tracing::warn!("log writer exited before shutdown was requested");
        }
        drop(queue);
        if writer.join().is_err() {
            tracing::warn!("log writer thread panicked");
        }

        *self.lifecycle.lock() = Lifecycle::Closed;
        self.settled.notify_all();
        tracing::debug!("log service closed");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.close();
    }
}

/// Whether a record goes to the console.
///
/// Debug records always do, regardless of the console flag.
pub fn echoes_to_console(kind: TraceKind, console: bool) -> bool {
    console || kind == TraceKind::Debug
}

/// Everything the writer thread owns.
struct Sink {
    console: bool,
    file: Option<LineWriter<File>>,
    on_event: Option<OnEvent>,
}

impl Sink {
    fn run(mut self, records: Receiver<Envelope>) {
        tracing::debug!("log writer started");

        let mut written = 0usize;
        while let Ok(envelope) = records.recv() {
            match envelope {
                Envelope::Record(record) => {
                    self.write(&record);
                    written += 1;
                }
                Envelope::Exit => break,
            }
        }

        // Producers that cloned the queue before close may still be sending;
        // the queue disconnects once the last of them is done.
        let mut drained = 0usize;
        while let Ok(envelope) = records.recv() {
            if let Envelope::Record(record) = envelope {
                self.write(&record);
                drained += 1;
            }
        }

        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.flush() {
                tracing::warn!(error = %e, "failed to flush log file");
            }
        }
        tracing::debug!(written, drained, "log writer stopped");
    }

    /// Console, then file, then callback; in that order, one record at a time.
    fn write(&mut self, record: &TraceRecord) {
        let line = format::as_line(record);

        if echoes_to_console(record.kind, self.console) {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{}", term::paint(record.kind, &line)) {
                tracing::trace!(error = %e, "failed to write trace record to console");
            }
        }

        if let Some(file) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                tracing::warn!(error = %e, "failed to write trace record to log file");
            }
        }

        if let Some(on_event) = &self.on_event {
            on_event(record);
        }
    }
}
