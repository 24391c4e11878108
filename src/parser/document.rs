use super::*;
use super::reduce::{reduce, Entry};

pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, BrikError> {
    let mut entries = Vec::new();

    while !parser.at(&TokenKind::Eof) {
        entries.push(parse_declaration(parser)?);
    }

    // Arrow entries cannot be declared at top level, so the root never
    // carries relations.
    let root = reduce(entries)?;
    log::debug!("parsed document with {} top-level declarations", root.entries.len());

    Ok(Document { items: root.entries })
}

fn parse_declaration(parser: &mut Parser) -> Result<Entry, BrikError> {
    let (name, line, column) = parser.expect_ident("a declaration name")?;

    match parser.peek() {
        TokenKind::Equals => {
            parser.bump()?;
            let value = value::parse_value(parser)?;
            Ok(Entry::Assign { name, value, line, column })
        }
        TokenKind::LBrace => {
            let block = block::parse_block(parser)?;
            Ok(Entry::Nested { name, block, line, column })
        }
        _ => Err(parser.unexpected(&format!("'=' or '{{' after '{}'", name))),
    }
}
