// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key under which a block's relations appear in interchange JSON.
pub const RELATIONS_KEY: &str = "_mappings";

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    List(Vec<Value>),
    Block(Block),
}

/// A directed `from -> to` pairing declared with arrow syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Relation {
    pub from: String,
    pub to: String,
}

/// Ordered mapping of declared keys to values. Relations are kept apart
/// from the keys and never share their namespace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub entries: IndexMap<String, Value>,
    pub relations: Vec<Relation>,
}

/// Root of a parsed source: top-level declarations in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub items: IndexMap<String, Value>,
}

impl Value {
    pub fn as_block(&self) -> Option<&Block> {
        if let Value::Block(block) = self {
            Some(block)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Value::List(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Block(_) => "block",
        }
    }
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn has_relations(&self) -> bool {
        !self.relations.is_empty()
    }

    /// Shallow overlay: keys of `other` replace same-named keys here (keeping
    /// their original position), new keys are appended. A non-empty relation
    /// sequence on `other` replaces this block's relations.
    pub fn merge(&mut self, other: Block) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
        if !other.relations.is_empty() {
            self.relations = other.relations;
        }
    }
}

impl Document {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.items.get(name)
    }

    /// Sequential key descent over nested blocks, e.g. `"reglas.vidas"`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.items.get(segments.next()?)?;
        for segment in segments {
            current = current.as_block()?.get(segment)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlays_and_keeps_position() {
        let mut a = Block::new();
        a.entries.insert("x".into(), Value::Int(1));
        a.entries.insert("y".into(), Value::Int(2));

        let mut b = Block::new();
        b.entries.insert("x".into(), Value::Int(10));
        b.entries.insert("z".into(), Value::Int(3));

        a.merge(b);
        let keys: Vec<_> = a.entries.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
        assert_eq!(a.get("x"), Some(&Value::Int(10)));
    }

    #[test]
    fn test_merge_relations_replace_only_when_present() {
        let rel = |f: &str, t: &str| Relation { from: f.into(), to: t.into() };
        let mut a = Block::new();
        a.relations.push(rel("a", "b"));

        a.merge(Block::new());
        assert_eq!(a.relations, vec![rel("a", "b")]);

        let mut b = Block::new();
        b.relations.push(rel("c", "d"));
        a.merge(b);
        assert_eq!(a.relations, vec![rel("c", "d")]);
    }

    #[test]
    fn test_lookup_descends_blocks_only() {
        let mut inner = Block::new();
        inner.entries.insert("vidas".into(), Value::Int(3));
        let mut doc = Document::default();
        doc.items.insert("reglas".into(), Value::Block(inner));
        doc.items.insert("nombre".into(), Value::String("snake".into()));

        assert_eq!(doc.lookup("reglas.vidas"), Some(&Value::Int(3)));
        assert_eq!(doc.lookup("reglas.otra"), None);
        assert_eq!(doc.lookup("nombre.x"), None);
        assert!(doc.lookup("reglas").and_then(Value::as_block).is_some());
    }
}
