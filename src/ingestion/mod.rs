//! Source formats and extraction entrypoints.
//!
//! Most callers should use [`extract_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`ExtractionOptions`])
//! - loads the document and extracts the mapped columns
//! - optionally reports success/failure/alerts to an [`ExtractionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`json`]
//! - [`xml`]
//! - [`csv`]

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;
pub mod xml;

pub use observability::{
    CompositeObserver, ExtractionContext, ExtractionObserver, ExtractionSeverity, ExtractionStats, FileObserver,
    StdErrObserver,
};
pub use unified::{ContentFormat, ExtractionOptions, ExtractionRequest, extract_from_path, extract_from_str};
