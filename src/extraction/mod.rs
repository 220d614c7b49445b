//! Mapping-driven extraction over a loaded document.
//!
//! This is the format-independent core. Each [`crate::types::Field`] path is resolved into a
//! [`Structure`], reduced to an [`AxisShape`], and then:
//!
//! - in [`OutputMode::DataSet`], the dominant shape is selected across all columns (the
//!   *template*) and every column is broadcast against it, so all columns end up the same length
//! - in [`OutputMode::IndividualValues`], every column is flattened on its own
//!
//! ## Example: broadcasting a scalar across an axis
//!
//! ```rust
//! use rust_data_extraction::extraction::parse;
//! use rust_data_extraction::ingestion::json::parse_json_document;
//! use rust_data_extraction::types::{OutputMode, Schema, Value};
//!
//! let doc = parse_json_document(
//!     r#"{"foo": [{"bar": "item1"}, {"bar": "item2"}], "date": "2020-01-01"}"#,
//! )
//! .unwrap();
//! let schema: Schema = [("items", "$.foo[*].bar"), ("date", "$.date")].into_iter().collect();
//!
//! let ds = parse(&schema, &doc, OutputMode::DataSet).unwrap().into_dataset().unwrap();
//! assert_eq!(ds.column("items").unwrap(), &[Value::text("item1"), Value::text("item2")]);
//! assert_eq!(ds.column("date").unwrap(), &[Value::text("2020-01-01"), Value::text("2020-01-01")]);
//! ```

pub mod broadcast;
pub mod path;
pub mod shape;
pub mod structure;

use crate::error::{ExtractionError, ExtractionResult};
use crate::types::{DataSet, Extraction, IndividualValues, OutputMode, Schema, Value};

pub use broadcast::broadcast;
pub use path::{PathExpression, reconstruct_mismatch_path};
pub use shape::{AxisShape, ShapeMismatch, compare};
pub use structure::Structure;

/// One mapped column, resolved against a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub path: PathExpression,
    pub structure: Structure,
    pub shape: AxisShape,
}

impl Column {
    /// Resolve `path` against `document`.
    pub fn resolve(name: &str, path: &str, document: &Value) -> Self {
        let path = PathExpression::parse(path);
        let structure = path.resolve(document);
        let shape = AxisShape::of(&structure);
        Self {
            name: name.to_owned(),
            path,
            structure,
            shape,
        }
    }

    /// Whether this column's shape should replace `other` as the broadcast template.
    ///
    /// Fails with [`ExtractionError::BroadcastMismatch`] naming both paths, cut down to the axis
    /// where the element counts diverge.
    pub fn dominates(&self, other: &Column) -> ExtractionResult<bool> {
        compare(&self.shape, &other.shape).map_err(|m| ExtractionError::BroadcastMismatch {
            left_path: reconstruct_mismatch_path(self.path.raw(), &m.axis_indices),
            left_count: m.left_count,
            right_path: reconstruct_mismatch_path(other.path.raw(), &m.axis_indices),
            right_count: m.right_count,
        })
    }
}

/// Resolve every field of `schema` against `document`, in declaration order.
pub fn resolve_columns(schema: &Schema, document: &Value) -> Vec<Column> {
    schema
        .fields
        .iter()
        .map(|f| Column::resolve(&f.name, &f.path, document))
        .collect()
}

/// Pick the column whose shape defines the dataset's rows.
///
/// Columns are scanned in order; a column without axes never becomes the template. The first
/// shape conflict aborts the whole selection. Returns `None` only for an empty column list.
pub fn select_template(columns: &[Column]) -> ExtractionResult<Option<&Column>> {
    let mut deepest: Option<&Column> = None;
    for column in columns {
        let current = *deepest.get_or_insert(column);
        if column.shape.is_no_axis() {
            continue;
        }
        if column.dominates(current)? {
            deepest = Some(column);
        }
    }
    Ok(deepest)
}

/// Extract `schema`'s columns from `document`.
///
/// Fails only in [`OutputMode::DataSet`], when two columns' shapes cannot be aligned.
pub fn parse(schema: &Schema, document: &Value, mode: OutputMode) -> ExtractionResult<Extraction> {
    let columns = resolve_columns(schema, document);
    match mode {
        OutputMode::DataSet => to_dataset(schema, &columns).map(Extraction::DataSet),
        OutputMode::IndividualValues => Ok(Extraction::IndividualValues(to_individual_values(schema, &columns))),
    }
}

fn to_dataset(schema: &Schema, columns: &[Column]) -> ExtractionResult<DataSet> {
    let no_axis = AxisShape::NoAxis;
    let template = select_template(columns)?.map_or(&no_axis, |c| &c.shape);
    let values = columns.iter().map(|c| broadcast(&c.structure, template)).collect();
    Ok(DataSet::new(schema.clone(), values))
}

fn to_individual_values(schema: &Schema, columns: &[Column]) -> IndividualValues {
    let values = columns.iter().map(|c| c.structure.individual_values()).collect();
    IndividualValues::new(schema.clone(), values)
}
