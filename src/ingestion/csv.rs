//! CSV source.
//!
//! CSV is not a tree, so it bypasses the broadcasting core: every mapped path is a single column
//! reference, written `$[N]` (0-based index) or `$[name]` (header name), and every column has one
//! value per data row.
//!
//! Rules:
//!
//! - The first row is a header row iff every mapped reference appears among its fields.
//! - Without a header row every reference must be a non-negative integer, otherwise the mapping
//!   implies a header that does not exist (configuration error).
//! - Cells past the end of a row are `Null`; cell text is passed through verbatim as
//!   [`Value::Utf8`].
//! - An empty input yields empty columns.

use std::io::Read;
use std::path::Path;

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::{DataSet, Extraction, IndividualValues, OutputMode, Schema, Value};

/// How the mapping lines up with the CSV columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    /// Whether the first row holds column names (and is skipped as data).
    pub has_header_row: bool,
    /// CSV column index for each schema field, in schema order.
    pub column_indexes: Vec<usize>,
}

/// Strip the `$[`...`]` wrapper from a mapped path, leaving the bare column reference.
pub fn column_reference(path: &str) -> &str {
    let path = path.trim();
    let path = path.strip_prefix("$[").unwrap_or(path);
    path.strip_suffix(']').unwrap_or(path)
}

fn is_plain_index(reference: &str) -> bool {
    !reference.is_empty() && reference.bytes().all(|b| b.is_ascii_digit())
}

/// Work out header presence and column indexes from the first row.
///
/// With no first row (empty input) or an empty schema there is nothing to resolve.
pub fn resolve_layout(schema: &Schema, first_row: Option<&csv::StringRecord>) -> ExtractionResult<CsvLayout> {
    let references: Vec<&str> = schema.fields.iter().map(|f| column_reference(&f.path)).collect();
    let first_row = match first_row {
        Some(row) if !references.is_empty() && !row.is_empty() => row,
        _ => {
            return Ok(CsvLayout {
                has_header_row: false,
                column_indexes: Vec::new(),
            });
        }
    };

    // A reference mapped by several columns only needs to appear once.
    let has_header_row = references.iter().all(|r| first_row.iter().any(|h| h == *r));

    let mut column_indexes = Vec::with_capacity(references.len());
    if has_header_row {
        for (field, reference) in schema.fields.iter().zip(&references) {
            let idx = first_row.iter().position(|h| h == *reference).ok_or_else(|| {
                ExtractionError::configuration(format!("column '{}' is not found in the csv file", field.name))
            })?;
            column_indexes.push(idx);
        }
    } else {
        for reference in &references {
            if !is_plain_index(reference) {
                return Err(ExtractionError::configuration(
                    "header row does not contain all columns in mapping",
                ));
            }
            let idx = reference
                .parse::<usize>()
                .map_err(|e| ExtractionError::configuration(format!("invalid column index '{reference}': {e}")))?;
            column_indexes.push(idx);
        }
    }

    Ok(CsvLayout {
        has_header_row,
        column_indexes,
    })
}

/// Extract `schema`'s columns from a CSV file.
pub fn extract_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> ExtractionResult<DataSet> {
    let mut rdr = reader_builder().from_path(path)?;
    extract_csv_from_reader(&mut rdr, schema)
}

/// Extract `schema`'s columns from in-memory CSV text.
pub fn extract_csv_from_str(input: &str, schema: &Schema) -> ExtractionResult<DataSet> {
    let mut rdr = reader_builder().from_reader(input.as_bytes());
    extract_csv_from_reader(&mut rdr, schema)
}

/// Extract `schema`'s columns from an existing CSV reader.
///
/// The reader must be built with `has_headers(false)`; header detection is done here.
pub fn extract_csv_from_reader<R: Read>(rdr: &mut csv::Reader<R>, schema: &Schema) -> ExtractionResult<DataSet> {
    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
    let layout = resolve_layout(schema, records.first())?;

    let data_rows = if layout.has_header_row { &records[1..] } else { &records[..] };
    let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(data_rows.len()); schema.fields.len()];
    if !layout.column_indexes.is_empty() {
        for record in data_rows {
            for (column, &idx) in columns.iter_mut().zip(&layout.column_indexes) {
                column.push(record.get(idx).map_or(Value::Null, |raw| Value::Utf8(raw.to_owned())));
            }
        }
    }

    Ok(DataSet::new(schema.clone(), columns))
}

/// Like [`extract_csv_from_str`], shaped for the requested [`OutputMode`].
///
/// CSV columns are always row-aligned, so individual values are the same columns as lists.
pub fn extract_csv_as(input: &str, schema: &Schema, mode: OutputMode) -> ExtractionResult<Extraction> {
    let ds = extract_csv_from_str(input, schema)?;
    Ok(shape_csv_output(ds, mode))
}

pub(crate) fn shape_csv_output(ds: DataSet, mode: OutputMode) -> Extraction {
    match mode {
        OutputMode::DataSet => Extraction::DataSet(ds),
        OutputMode::IndividualValues => {
            let schema = ds.schema.clone();
            let values = ds
                .into_columns()
                .into_iter()
                .map(|(_, column)| Value::Sequence(column))
                .collect();
            Extraction::IndividualValues(IndividualValues::new(schema, values))
        }
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}
