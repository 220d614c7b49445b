//! XML source.
//!
//! XML is normalized into the same [`Value`] tree shape JSON produces:
//!
//! - the root element's name is the single top-level key
//! - every element becomes a [`Value::Mapping`]
//! - attributes become `@name` entries
//! - an element's own non-blank text (trimmed) becomes the `&text` entry
//! - repeated sibling elements with the same name become a [`Value::Sequence`]; a single one
//!   stays a bare mapping (wildcard paths treat it as a one-element sequence)
//!
//! ```rust
//! use rust_data_extraction::ingestion::xml::extract_xml_from_str;
//! use rust_data_extraction::types::{OutputMode, Schema, Value};
//!
//! let xml = r#"<product><foo bar="a">10</foo><foo bar="b">20</foo></product>"#;
//! let schema: Schema = [("items", "$.product.foo[*].@bar")].into_iter().collect();
//! let ds = extract_xml_from_str(xml, &schema, OutputMode::DataSet).unwrap().into_dataset().unwrap();
//! assert_eq!(ds.column("items").unwrap(), &[Value::text("a"), Value::text("b")]);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ExtractionError, ExtractionResult};
use crate::extraction;
use crate::types::{Extraction, OutputMode, Schema, Value};

/// Key under which an element's text content is stored.
pub const TEXT_KEY: &str = "&text";
/// Prefix for attribute keys.
pub const ATTRIBUTE_PREFIX: char = '@';

struct OpenElement {
    name: String,
    entries: BTreeMap<String, Value>,
    text: String,
}

impl OpenElement {
    fn start(e: &BytesStart<'_>) -> ExtractionResult<Self> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut entries = BTreeMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(ExtractionError::malformed)?;
            let key = format!("{ATTRIBUTE_PREFIX}{}", String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value().map_err(ExtractionError::malformed)?;
            entries.insert(key, Value::Utf8(value.into_owned()));
        }
        Ok(Self {
            name,
            entries,
            text: String::new(),
        })
    }

    fn finish(mut self) -> (String, Value) {
        let text = self.text.trim();
        if !text.is_empty() {
            self.entries.insert(TEXT_KEY.to_owned(), Value::Utf8(text.to_owned()));
        }
        (self.name, Value::Mapping(self.entries))
    }
}

/// Add a child element, turning repeated names into a sequence.
fn insert_child(entries: &mut BTreeMap<String, Value>, name: String, node: Value) {
    match entries.get_mut(&name) {
        None => {
            entries.insert(name, node);
        }
        Some(Value::Sequence(items)) => items.push(node),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::Null);
            *existing = Value::Sequence(vec![first, node]);
        }
    }
}

/// Load XML text into a document tree.
pub fn parse_xml_document(input: &str) -> ExtractionResult<Value> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: BTreeMap<String, Value> = BTreeMap::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(ExtractionError::malformed(format!(
                    "could not parse the xml content at position {}: {e}",
                    reader.buffer_position()
                )));
            }
        };

        match event {
            Event::Start(e) => stack.push(OpenElement::start(&e)?),
            Event::Empty(e) => {
                let (name, node) = OpenElement::start(&e)?.finish();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.entries, name, node),
                    None => insert_child(&mut root, name, node),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ExtractionError::malformed("unexpected closing tag"))?;
                let (name, node) = element.finish();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.entries, name, node),
                    None => insert_child(&mut root, name, node),
                }
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    let text = t.unescape().map_err(ExtractionError::malformed)?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ExtractionError::malformed(format!(
            "could not parse the xml content: element <{}> is not closed",
            open.name
        )));
    }
    if root.is_empty() {
        return Err(ExtractionError::malformed("could not parse the xml content: no root element"));
    }
    Ok(Value::Mapping(root))
}

/// Extract `schema`'s columns from an XML file.
pub fn extract_xml_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    mode: OutputMode,
) -> ExtractionResult<Extraction> {
    let text = fs::read_to_string(path)?;
    extract_xml_from_str(&text, schema, mode)
}

/// Extract `schema`'s columns from in-memory XML text.
pub fn extract_xml_from_str(input: &str, schema: &Schema, mode: OutputMode) -> ExtractionResult<Extraction> {
    let document = parse_xml_document(input)?;
    extraction::parse(schema, &document, mode)
}
