use indexmap::IndexMap;

use super::*;
use crate::ast::{Relation, RELATIONS_KEY};

/// A raw declaration as parsed inside one scope, before duplicate keys are
/// resolved.
#[derive(Debug)]
pub(super) enum Entry {
    Assign { name: String, value: Value, line: usize, column: usize },
    Nested { name: String, block: Block, line: usize, column: usize },
    Relation(Relation),
}

/// Fold a scope's entries left to right into one block.
///
/// - `name = value`: set if absent; block onto block merges; a non-block
///   onto a block is rejected; anything onto a scalar or list overwrites.
/// - `name { .. }`: set if absent; merges into an existing block; rejected
///   when the existing value is not a block.
/// - `a -> b`: appended to the block's relations.
///
/// The relations key is never accepted as an ordinary name, so serialized
/// relations cannot be confused with a declared entry.
pub(super) fn reduce(entries: Vec<Entry>) -> Result<Block, BrikError> {
    let mut block = Block::new();

    for entry in entries {
        match entry {
            Entry::Assign { name, value, line, column } => {
                check_reserved_key(&name, line, column)?;
                assign(&mut block.entries, name, value, line, column)?;
            }
            Entry::Nested { name, block: nested, line, column } => {
                check_reserved_key(&name, line, column)?;
                nest(&mut block.entries, name, nested, line, column)?;
            }
            Entry::Relation(relation) => block.relations.push(relation),
        }
    }

    Ok(block)
}

fn assign(
    entries: &mut IndexMap<String, Value>,
    name: String,
    value: Value,
    line: usize,
    column: usize,
) -> Result<(), BrikError> {
    match entries.get_mut(&name) {
        None => {
            entries.insert(name, value);
        }
        Some(Value::Block(existing)) => match value {
            Value::Block(incoming) => merge(existing, incoming, &name, line, column),
            other => return Err(incompatible(&name, other.kind(), line, column)),
        },
        Some(slot) => {
            log::debug!("'{}' redeclared at {}:{}, last value wins", name, line, column);
            *slot = value;
        }
    }
    Ok(())
}

fn nest(
    entries: &mut IndexMap<String, Value>,
    name: String,
    block: Block,
    line: usize,
    column: usize,
) -> Result<(), BrikError> {
    match entries.get_mut(&name) {
        None => {
            entries.insert(name, Value::Block(block));
        }
        Some(Value::Block(existing)) => merge(existing, block, &name, line, column),
        Some(other) => return Err(incompatible(&name, other.kind(), line, column)),
    }
    Ok(())
}

fn merge(existing: &mut Block, incoming: Block, name: &str, line: usize, column: usize) {
    log::debug!("merging duplicate block '{}' at {}:{}", name, line, column);
    existing.merge(incoming);
}

fn check_reserved_key(name: &str, line: usize, column: usize) -> Result<(), BrikError> {
    if name == RELATIONS_KEY {
        return Err(BrikError::parse(
            format!("Key '{}' is reserved for '->' entries", RELATIONS_KEY),
            line,
            column,
            Some("Rename the key; relations are written with 'from -> to'"),
            203,
        ));
    }
    Ok(())
}

fn incompatible(name: &str, kind: &str, line: usize, column: usize) -> BrikError {
    BrikError::parse(
        format!("Incompatible duplicate entry '{}' ({} vs block)", name, kind),
        line,
        column,
        Some("A block can only be merged with another block"),
        202,
    )
}
