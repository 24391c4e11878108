// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ast::{Block, Document, Relation, Value, RELATIONS_KEY};
use crate::parser;
use crate::BrikError;

/// Name of the artifact written next to the source file.
pub const ARTIFACT_NAME: &str = "arbol.ast";

/// JSON rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// No insignificant whitespace.
    #[default]
    Compact,
    /// Two-space indentation.
    Pretty,
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Block(block) => block.serialize(serializer),
        }
    }
}

/// Keys in declaration order, then the relations (if any) under
/// [`RELATIONS_KEY`].
impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.entries.len() + usize::from(self.has_relations());
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        if self.has_relations() {
            map.serialize_entry(RELATIONS_KEY, &self.relations)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.items)
    }
}

/// Render a document as JSON text.
///
/// Both formats describe the same tree; object keys follow declaration
/// order.
pub fn to_json_string(doc: &Document, format: Format) -> Result<String, BrikError> {
    let rendered = match format {
        Format::Compact => serde_json::to_string(doc),
        Format::Pretty => serde_json::to_string_pretty(doc),
    };
    rendered.map_err(|e| BrikError::type_error(format!("Failed to serialize document: {}", e), None, 409))
}

/// Convert a document into an order-preserving `serde_json::Value`.
pub fn to_json_value(doc: &Document) -> Result<serde_json::Value, BrikError> {
    serde_json::to_value(doc)
        .map_err(|e| BrikError::type_error(format!("Failed to serialize document: {}", e), None, 409))
}

/// Rebuild a value tree from interchange JSON.
impl TryFrom<serde_json::Value> for Value {
    type Error = BrikError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if n.is_f64() {
                    n.as_f64().map(Value::Float).ok_or_else(|| bad_number(&n))
                } else {
                    Err(bad_number(&n))
                }
            }
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            serde_json::Value::Object(map) => block_from_json(map).map(Value::Block),
            serde_json::Value::Null => Err(BrikError::type_error(
                "null has no BRIK equivalent",
                Some("Interchange documents only hold numbers, strings, booleans, lists and blocks"),
                410,
            )),
        }
    }
}

impl TryFrom<serde_json::Value> for Document {
    type Error = BrikError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(map) = json else {
            return Err(BrikError::type_error(
                "Document root must be a JSON object",
                None,
                411,
            ));
        };

        let mut items = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            items.insert(key, Value::try_from(value)?);
        }
        Ok(Document { items })
    }
}

fn block_from_json(map: serde_json::Map<String, serde_json::Value>) -> Result<Block, BrikError> {
    let mut block = Block::new();
    for (key, value) in map {
        if key == RELATIONS_KEY {
            if let Some(relations) = relations_from_json(&value) {
                block.relations = relations;
                continue;
            }
        }
        block.entries.insert(key, Value::try_from(value)?);
    }
    Ok(block)
}

/// A non-empty array of `{"from", "to"}` objects; anything else under the
/// reserved key is treated as an ordinary entry.
fn relations_from_json(value: &serde_json::Value) -> Option<Vec<Relation>> {
    match value {
        serde_json::Value::Array(items) if !items.is_empty() => {
            serde_json::from_value(value.clone()).ok()
        }
        _ => None,
    }
}

fn bad_number(n: &serde_json::Number) -> BrikError {
    BrikError::type_error(format!("Number {} is out of range", n), None, 412)
}

/// Parse interchange JSON text back into a document.
pub fn document_from_json_str(json: &str) -> Result<Document, BrikError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| BrikError::type_error(format!("Invalid JSON: {}", e), None, 413))?;
    Document::try_from(value)
}

/// Parse a `.brik` file, write its pretty JSON to [`ARTIFACT_NAME`] next to
/// it, and return the artifact path with the JSON rendered in `format`.
///
/// Nothing is written when the source fails to lex or parse.
///
/// # Examples
/// ```no_run
/// use brik::export::{export_file, Format};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (artifact, json) = export_file("snake.brik", Format::Compact)?;
/// println!("{} -> {}", artifact.display(), json);
/// # Ok(())
/// # }
/// ```
pub fn export_file<P: AsRef<Path>>(path: P, format: Format) -> Result<(PathBuf, String), BrikError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|e| BrikError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.display().to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })?;

    let doc = parser::parse(&input)?;
    let artifact = path.with_file_name(ARTIFACT_NAME);

    fs::write(&artifact, to_json_string(&doc, Format::Pretty)?).map_err(|e| BrikError::FileError {
        message: format!("Failed to write artifact: {}", e),
        path: artifact.display().to_string(),
        hint: None,
        code: Some(302),
    })?;
    log::info!("wrote {}", artifact.display());

    let rendered = to_json_string(&doc, format)?;
    Ok((artifact, rendered))
}
