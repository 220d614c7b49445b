//! Unified extraction entrypoint.
//!
//! Most callers should use [`extract_from_path`], which loads a file, extracts the columns named
//! by a [`crate::types::Schema`], and returns an [`crate::types::Extraction`].
//!
//! - If [`ExtractionOptions::format`] is `None`, the format is inferred from the file extension.
//! - [`ExtractionOptions::mode`] selects dataset (row-aligned) or individual-values output.
//! - If an [`super::observability::ExtractionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::{Extraction, OutputMode, Schema};

use super::observability::{ExtractionContext, ExtractionObserver, ExtractionSeverity, ExtractionStats};
use super::{csv, json, xml};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// Any JSON document.
    Json,
    /// XML, normalized to the JSON tree shape.
    Xml,
    /// Comma-separated values, with or without a header row.
    Csv,
}

impl ContentFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Options controlling unified extraction behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ExtractionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<ContentFormat>,
    /// Output shape. Defaults to [`OutputMode::DataSet`].
    pub mode: OutputMode,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ExtractionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ExtractionSeverity,
}

impl fmt::Debug for ExtractionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionOptions")
            .field("format", &self.format)
            .field("mode", &self.mode)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            format: None,
            mode: OutputMode::default(),
            observer: None,
            alert_at_or_above: ExtractionSeverity::Critical,
        }
    }
}

/// Unified extraction entry point for path-based sources.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with column/row stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ## JSON (auto-detect by extension)
///
/// ```no_run
/// use rust_data_extraction::ingestion::{extract_from_path, ExtractionOptions};
/// use rust_data_extraction::types::{Field, Schema};
///
/// # fn main() -> Result<(), rust_data_extraction::ExtractionError> {
/// let schema = Schema::new(vec![
///     Field::new("price", "$.prices[*].price"),
///     Field::new("currency", "$.prices[*].currencies[*]"),
/// ]);
///
/// let out = extract_from_path("products.json", &schema, &ExtractionOptions::default())?;
/// println!("rows={:?}", out.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Individual values from XML
///
/// ```no_run
/// use rust_data_extraction::ingestion::{extract_from_path, ExtractionOptions};
/// use rust_data_extraction::types::{OutputMode, Schema};
///
/// # fn main() -> Result<(), rust_data_extraction::ExtractionError> {
/// let schema: Schema = [("dates", "$.xml.info.dates.date[*].&text")].into_iter().collect();
/// let opts = ExtractionOptions {
///     mode: OutputMode::IndividualValues,
///     ..Default::default()
/// };
///
/// let out = extract_from_path("products.xml", &schema, &opts)?;
/// println!("{out:?}");
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_data_extraction::ingestion::{
///     extract_from_path, ExtractionOptions, ExtractionSeverity, StdErrObserver,
/// };
/// use rust_data_extraction::types::Schema;
///
/// # fn main() -> Result<(), rust_data_extraction::ExtractionError> {
/// let schema: Schema = [("id", "$[0]")].into_iter().collect();
///
/// let opts = ExtractionOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: ExtractionSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and will trigger `on_alert` at this threshold.
/// let _err = extract_from_path("does_not_exist.csv", &schema, &opts).unwrap_err();
/// # Ok(())
/// # }
/// ```
pub fn extract_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &ExtractionOptions,
) -> ExtractionResult<Extraction> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = ExtractionContext {
        path: Some(path.to_path_buf()),
        format,
        mode: options.mode,
    };

    let result = match format {
        ContentFormat::Json => json::extract_json_from_path(path, schema, options.mode),
        ContentFormat::Xml => xml::extract_xml_from_path(path, schema, options.mode),
        ContentFormat::Csv => {
            csv::extract_csv_from_path(path, schema).map(|ds| csv::shape_csv_output(ds, options.mode))
        }
    };

    report(options, &ctx, &result);
    result
}

/// Unified extraction entry point for in-memory content.
///
/// The format cannot be inferred here, so it is passed explicitly; `options.format` is ignored.
pub fn extract_from_str(
    content: &str,
    format: ContentFormat,
    schema: &Schema,
    options: &ExtractionOptions,
) -> ExtractionResult<Extraction> {
    let ctx = ExtractionContext {
        path: None,
        format,
        mode: options.mode,
    };

    let result = match format {
        ContentFormat::Json => json::extract_json_from_str(content, schema, options.mode),
        ContentFormat::Xml => xml::extract_xml_from_str(content, schema, options.mode),
        ContentFormat::Csv => csv::extract_csv_as(content, schema, options.mode),
    };

    report(options, &ctx, &result);
    result
}

fn report(options: &ExtractionOptions, ctx: &ExtractionContext, result: &ExtractionResult<Extraction>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(out) => obs.on_success(
            ctx,
            ExtractionStats {
                columns: out.column_count(),
                rows: out.row_count(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &ExtractionError) -> ExtractionSeverity {
    match e {
        ExtractionError::Io(_) => ExtractionSeverity::Critical,
        ExtractionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ExtractionSeverity::Critical,
            _ => ExtractionSeverity::Error,
        },
        ExtractionError::MalformedDocument { .. }
        | ExtractionError::Configuration { .. }
        | ExtractionError::BroadcastMismatch { .. } => ExtractionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> ExtractionResult<ContentFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            ExtractionError::configuration(format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ))
        })?;

    ContentFormat::from_extension(ext).ok_or_else(|| {
        ExtractionError::configuration(format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ))
    })
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue extraction work in a job system.
#[derive(Clone)]
pub struct ExtractionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Columns to extract.
    pub schema: Schema,
    /// Options controlling extraction.
    pub options: ExtractionOptions,
}

impl fmt::Debug for ExtractionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionRequest")
            .field("path", &self.path)
            .field("schema_fields", &self.schema.fields.len())
            .field("options", &self.options)
            .finish()
    }
}

impl ExtractionRequest {
    /// Execute the request by calling [`extract_from_path`].
    pub fn run(&self) -> ExtractionResult<Extraction> {
        extract_from_path(&self.path, &self.schema, &self.options)
    }
}
