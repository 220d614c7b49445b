//! Core data model types for extraction.
//!
//! Documents are loaded into a [`Value`] tree; a [`Schema`] (a list of named [`Field`] paths)
//! says which columns to pull out of it. Results come back as a [`DataSet`] (equal-length,
//! row-aligned columns) or as [`IndividualValues`] (one unaligned value per column).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ExtractionError, ExtractionResult};

/// A node of a loaded document.
///
/// Scalars are passed through verbatim; extraction never coerces between variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Ordered list of nodes.
    Sequence(Vec<Value>),
    /// Keyed nodes. Key order carries no meaning.
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// Shorthand for [`Value::Utf8`].
    pub fn text(s: impl Into<String>) -> Self {
        Self::Utf8(s.into())
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int64(i),
                None => n.as_f64().map(Self::Float64).unwrap_or(Self::Null),
            },
            serde_json::Value::String(s) => Self::Utf8(s),
            serde_json::Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// A single named column and the path expression that extracts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Path expression, e.g. `$.prices[*].price` or `$[price]` for CSV.
    pub path: String,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// The column mapping: which columns to extract, in declaration order.
///
/// Declaration order is significant for dataset extraction; ties between equally-shaped columns
/// are resolved in favour of the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Read a mapping from a JSON object of `"column": "path"` pairs, keeping declaration order.
    ///
    /// ```rust
    /// use rust_data_extraction::types::Schema;
    ///
    /// let schema = Schema::from_json_mapping(r#"{"items": "$.foo[*].bar", "date": "$.date"}"#).unwrap();
    /// assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["items", "date"]);
    /// ```
    pub fn from_json_mapping(input: &str) -> ExtractionResult<Self> {
        let v: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ExtractionError::configuration(format!("invalid mapping document: {e}")))?;
        let obj = v
            .as_object()
            .ok_or_else(|| ExtractionError::configuration("mapping document must be a json object"))?;

        let mut fields = Vec::with_capacity(obj.len());
        for (name, path) in obj {
            let path = path.as_str().ok_or_else(|| {
                ExtractionError::configuration(format!("path for column '{name}' must be a string"))
            })?;
            fields.push(Field::new(name.as_str(), path));
        }
        Ok(Self::new(fields))
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl<N, P> FromIterator<(N, P)> for Schema
where
    N: Into<String>,
    P: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(n, p)| Field::new(n, p)).collect())
    }
}

/// What shape of result to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Row-aligned columns of equal length, broadcasting scalars across foreign axes.
    #[default]
    DataSet,
    /// Each column's own values, flattened, with no cross-column alignment.
    IndividualValues,
}

/// In-memory tabular result of a dataset extraction.
///
/// Values are stored column-major in [`Schema`] field order. Every column has the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing the columns.
    pub schema: Schema,
    columns: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and columns.
    ///
    /// # Panics
    ///
    /// Panics if the column count differs from the field count, or if columns differ in length.
    pub fn new(schema: Schema, columns: Vec<Vec<Value>>) -> Self {
        assert!(
            columns.len() == schema.fields.len(),
            "column count {} does not match schema length {}",
            columns.len(),
            schema.fields.len()
        );
        if let Some(first) = columns.first() {
            assert!(
                columns.iter().all(|c| c.len() == first.len()),
                "dataset columns must all have the same length"
            );
        }
        Self { schema, columns }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// All values of a column, if the column exists.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        let idx = self.schema.index_of(name)?;
        self.columns.get(idx).map(Vec::as_slice)
    }

    /// Columns in schema order.
    pub fn columns(&self) -> &[Vec<Value>] {
        &self.columns
    }

    /// Values of row `idx` in schema order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c[idx]).collect())
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.row_count()).filter_map(|i| self.row(i))
    }

    /// Consume the dataset into `(column name, values)` pairs in schema order.
    pub fn into_columns(self) -> Vec<(String, Vec<Value>)> {
        self.schema
            .fields
            .into_iter()
            .map(|f| f.name)
            .zip(self.columns)
            .collect()
    }
}

/// Result of an individual-values extraction: one value per column, not aligned across columns.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualValues {
    /// Schema describing the columns.
    pub schema: Schema,
    values: Vec<Value>,
}

impl IndividualValues {
    /// Create from schema and one value per field.
    ///
    /// # Panics
    ///
    /// Panics if the value count differs from the field count.
    pub fn new(schema: Schema, values: Vec<Value>) -> Self {
        assert!(
            values.len() == schema.fields.len(),
            "value count {} does not match schema length {}",
            values.len(),
            schema.fields.len()
        );
        Self { schema, values }
    }

    /// The value extracted for `name`, if the column exists.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).and_then(|i| self.values.get(i))
    }

    /// Values in schema order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Output of an extraction, depending on the requested [`OutputMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Result of [`OutputMode::DataSet`].
    DataSet(DataSet),
    /// Result of [`OutputMode::IndividualValues`].
    IndividualValues(IndividualValues),
}

impl Extraction {
    /// Number of extracted columns.
    pub fn column_count(&self) -> usize {
        match self {
            Self::DataSet(ds) => ds.schema.fields.len(),
            Self::IndividualValues(iv) => iv.schema.fields.len(),
        }
    }

    /// Row count for datasets; `None` for individual values.
    pub fn row_count(&self) -> Option<usize> {
        match self {
            Self::DataSet(ds) => Some(ds.row_count()),
            Self::IndividualValues(_) => None,
        }
    }

    /// Returns the dataset, if this is a dataset result.
    pub fn into_dataset(self) -> Option<DataSet> {
        match self {
            Self::DataSet(ds) => Some(ds),
            Self::IndividualValues(_) => None,
        }
    }

    /// Returns the individual values, if this is an individual-values result.
    pub fn into_individual_values(self) -> Option<IndividualValues> {
        match self {
            Self::DataSet(_) => None,
            Self::IndividualValues(iv) => Some(iv),
        }
    }
}
