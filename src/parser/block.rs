use super::*;
use super::reduce::{reduce, Entry};
use crate::ast::Relation;

/// `'{' ( Entry Separator? )* '}'`, reduced into a single block.
pub(super) fn parse_block(parser: &mut Parser) -> Result<Block, BrikError> {
    parser.descend()?;
    let block = parse_block_body(parser);
    parser.ascend();
    block
}

fn parse_block_body(parser: &mut Parser) -> Result<Block, BrikError> {
    parser.expect(TokenKind::LBrace)?;
    let mut entries = Vec::new();

    loop {
        match parser.peek() {
            TokenKind::RBrace => break,
            TokenKind::Ident(_) => {}
            _ => return Err(parser.unexpected("an entry name or '}'")),
        }

        entries.push(parse_entry(parser)?);

        // Entries are separated by a comma or by plain adjacency.
        match parser.peek() {
            TokenKind::Comma => {
                parser.bump()?;
            }
            TokenKind::Ident(_) | TokenKind::RBrace => {}
            _ => return Err(parser.unexpected("',', a new entry or '}'")),
        }
    }

    parser.expect(TokenKind::RBrace)?;
    reduce(entries)
}

fn parse_entry(parser: &mut Parser) -> Result<Entry, BrikError> {
    let (name, line, column) = parser.expect_ident("an entry name")?;

    match parser.peek() {
        TokenKind::Arrow => {
            parser.bump()?;
            let to = parse_relation_target(parser)?;
            Ok(Entry::Relation(Relation { from: name, to }))
        }
        TokenKind::Equals => {
            parser.bump()?;
            let value = value::parse_value(parser)?;
            Ok(Entry::Assign { name, value, line, column })
        }
        TokenKind::LBrace => {
            let block = parse_block(parser)?;
            Ok(Entry::Nested { name, block, line, column })
        }
        _ => Err(parser.unexpected(&format!("'->', '=' or '{{' after '{}'", name))),
    }
}

fn parse_relation_target(parser: &mut Parser) -> Result<String, BrikError> {
    match parser.peek() {
        TokenKind::Ident(_) | TokenKind::String(_) => {}
        _ => return Err(parser.unexpected("an identifier or string after '->'")),
    }

    match parser.bump()?.kind {
        TokenKind::Ident(target) | TokenKind::String(target) => Ok(target),
        _ => unreachable!(),
    }
}
