//! JSON source.
//!
//! The whole document is loaded into a [`Value`] tree, then handed to [`crate::extraction::parse`].
//! Any JSON value is accepted as the root; arrays at the root are addressed with an empty key
//! (`$[*].field`).

use std::fs;
use std::path::Path;

use crate::error::{ExtractionError, ExtractionResult};
use crate::extraction;
use crate::types::{Extraction, OutputMode, Schema, Value};

/// Load JSON text into a document tree.
pub fn parse_json_document(input: &str) -> ExtractionResult<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExtractionError::malformed("json input is empty"));
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .map(Value::from)
        .map_err(|e| ExtractionError::malformed(format!("could not parse the json content: {e}")))
}

/// Extract `schema`'s columns from a JSON file.
pub fn extract_json_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    mode: OutputMode,
) -> ExtractionResult<Extraction> {
    let text = fs::read_to_string(path)?;
    extract_json_from_str(&text, schema, mode)
}

/// Extract `schema`'s columns from in-memory JSON text.
pub fn extract_json_from_str(input: &str, schema: &Schema, mode: OutputMode) -> ExtractionResult<Extraction> {
    let document = parse_json_document(input)?;
    extraction::parse(schema, &document, mode)
}
