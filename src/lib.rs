//! `rust-data-extraction` pulls named columns out of semi-structured documents using per-column
//! path expressions, and reconciles columns rooted at different (possibly ragged) array axes into
//! a row-aligned [`types::DataSet`].
//!
//! The primary entrypoint is [`ingestion::extract_from_path`], which auto-detects the source
//! format from the file extension (or you can force a format via
//! [`ingestion::ExtractionOptions`]).
//!
//! ## Sources
//!
//! - **JSON**: `.json`, any document shape
//! - **XML**: `.xml`, normalized to the JSON tree shape (`@attr` for attributes, `&text` for text)
//! - **CSV**: `.csv`, columns referenced as `$[N]` or `$[header name]`
//!
//! ## Paths
//!
//! Segments are separated by `.`; `key[N]` indexes, `key[]`/`key[*]` iterates. Each wildcard is
//! an *axis*. Values are passed through verbatim (strings are trimmed).
//!
//! ## Output modes
//!
//! - [`types::OutputMode::DataSet`]: all columns have the same length. The column with the
//!   richest axes becomes the template; columns with fewer axes have their values replayed across
//!   the template's extra axes. Columns whose axes disagree in length fail with
//!   [`ExtractionError::BroadcastMismatch`].
//! - [`types::OutputMode::IndividualValues`]: each column's own values, flattened, unaligned.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_data_extraction::ingestion::{extract_from_str, ContentFormat, ExtractionOptions};
//! use rust_data_extraction::types::{Schema, Value};
//!
//! # fn main() -> Result<(), rust_data_extraction::ExtractionError> {
//! let json = r#"{
//!   "prices": [
//!     {"price": 10, "currencies": ["EUR", "USD"]},
//!     {"price": 14, "currencies": ["AUD"]}
//!   ]
//! }"#;
//! let schema: Schema = [
//!     ("price", "$.prices[*].price"),
//!     ("currency", "$.prices[*].currencies[*]"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let out = extract_from_str(json, ContentFormat::Json, &schema, &ExtractionOptions::default())?;
//! let ds = out.into_dataset().unwrap();
//! assert_eq!(ds.column("price").unwrap(), &[Value::Int64(10), Value::Int64(10), Value::Int64(14)]);
//! assert_eq!(ds.row_count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified entrypoints, format loaders, observers
//! - [`extraction`]: path resolution, shape comparison and broadcasting
//! - [`types`]: document values, schema and result types
//! - [`error`]: error types

pub mod error;
pub mod extraction;
pub mod ingestion;
pub mod types;

pub use error::{ExtractionError, ExtractionResult};
