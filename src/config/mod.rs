// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use crate::ast::{Block, Document, Relation, Value};
use crate::export;
use crate::parser;
use crate::BrikError;

mod access;
mod conversion;

/// Read-only view over a parsed document with dotted-path lookups, the way
/// game runtimes consume it.
#[derive(Debug, Clone)]
pub struct BrikConfig {
    document: Document,
}

impl BrikConfig {
    /// Parse BRIK source text.
    pub fn from_str(content: &str) -> Result<Self, BrikError> {
        let document = parser::parse(content)?;
        Ok(Self { document })
    }

    /// Load and parse a `.brik` file.
    ///
    /// # Example
    /// ```ignore
    /// let config = BrikConfig::from_file("snake.brik")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BrikError> {
        Self::from_str(&read_file(path.as_ref())?)
    }

    /// Load a document from its interchange JSON text.
    pub fn from_ast_str(json: &str) -> Result<Self, BrikError> {
        let document = export::document_from_json_str(json)?;
        Ok(Self { document })
    }

    /// Load a previously exported artifact such as `arbol.ast`.
    pub fn from_ast_file<P: AsRef<Path>>(path: P) -> Result<Self, BrikError> {
        Self::from_ast_str(&read_file(path.as_ref())?)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl From<Document> for BrikConfig {
    fn from(document: Document) -> Self {
        Self { document }
    }
}

fn read_file(path: &Path) -> Result<String, BrikError> {
    fs::read_to_string(path).map_err(|e| BrikError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.display().to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })
}
