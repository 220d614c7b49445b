//! Outcome reporting for extraction calls.
//!
//! The unified entrypoints hand every outcome to an optional [`ExtractionObserver`]. Failures carry
//! an [`ExtractionSeverity`]; a broadcast mismatch is an `Error` (the document disagrees with the
//! mapping) while a file that cannot be read is `Critical`.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ExtractionError;
use crate::types::OutputMode;

use super::unified::ContentFormat;

/// How bad a failed extraction is. Ordered, so it doubles as the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExtractionSeverity {
    Info,
    Warning,
    /// The document or mapping was rejected.
    Error,
    /// The source could not be read at all.
    Critical,
}

/// Which source, format and output mode an outcome belongs to.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    /// The input path, or `None` for in-memory content.
    pub path: Option<PathBuf>,
    /// Source format.
    pub format: ContentFormat,
    /// Requested output shape.
    pub mode: OutputMode,
}

impl ExtractionContext {
    fn source(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => "<memory>".to_string(),
        }
    }
}

/// Size of a successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Number of extracted columns.
    pub columns: usize,
    /// Rows after broadcasting against the template; `None` for individual values.
    pub rows: Option<usize>,
}

/// Receives the outcome of each unified extraction call.
pub trait ExtractionObserver: Send + Sync {
    /// Called when extraction succeeds.
    fn on_success(&self, _ctx: &ExtractionContext, _stats: ExtractionStats) {}

    /// Called when extraction fails.
    fn on_failure(&self, _ctx: &ExtractionContext, _severity: ExtractionSeverity, _error: &ExtractionError) {}

    /// Called when an extraction failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ExtractionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ExtractionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ExtractionObserver for CompositeObserver {
    fn on_success(&self, ctx: &ExtractionContext, stats: ExtractionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// One line per outcome on stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ExtractionObserver for StdErrObserver {
    fn on_success(&self, ctx: &ExtractionContext, stats: ExtractionStats) {
        eprintln!(
            "[extract][ok] format={:?} mode={:?} source={} columns={} rows={:?}",
            ctx.format,
            ctx.mode,
            ctx.source(),
            stats.columns,
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        eprintln!(
            "[extract][{:?}] kind={} format={:?} source={} err={}",
            severity,
            error.kind(),
            ctx.format,
            ctx.source(),
            error
        );
    }

    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        eprintln!(
            "[ALERT][extract][{:?}] kind={} format={:?} source={} err={}",
            severity,
            error.kind(),
            ctx.format,
            ctx.source(),
            error
        );
    }
}

/// Appends one line per outcome to a log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Log to `path`. Lines are best-effort: open and write failures are dropped.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ExtractionObserver for FileObserver {
    fn on_success(&self, ctx: &ExtractionContext, stats: ExtractionStats) {
        self.append_line(&format!(
            "{} ok format={:?} mode={:?} source={} columns={} rows={:?}",
            unix_ts(),
            ctx.format,
            ctx.mode,
            ctx.source(),
            stats.columns,
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.append_line(&format!(
            "{} fail severity={:?} kind={} format={:?} mode={:?} source={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.format,
            ctx.mode,
            ctx.source(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ExtractionContext, severity: ExtractionSeverity, error: &ExtractionError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} kind={} format={:?} mode={:?} source={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.format,
            ctx.mode,
            ctx.source(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
