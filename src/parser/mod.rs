// Author: Dustin Pilgrim
// License: MIT

use crate::lexer::{Lexer, Token, TokenKind};
use crate::BrikError;
use crate::ast::{Block, Document, Value};

mod block;
mod document;
mod reduce;
mod value;

/// Deepest allowed nesting of blocks and lists. Exported JSON must stay
/// under serde_json's default recursion limit of 128, counting the root
/// object and the two levels a relation array adds.
pub const MAX_DEPTH: usize = 100;

/// One-token-lookahead recursive descent parser. Besides the current
/// lookahead token it only tracks how deeply blocks and lists are nested.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, BrikError> {
        let mut lexer = Lexer::new(input);
        let peek = lexer.next_token()?;
        log::trace!("token {} at {}:{}", peek.kind, peek.line, peek.column);
        Ok(Self { lexer, peek, depth: 0 })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, BrikError> {
        let next = self.lexer.next_token()?;
        log::trace!("token {} at {}:{}", next.kind, next.line, next.column);
        Ok(std::mem::replace(&mut self.peek, next))
    }

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.peek.kind
    }

    pub(crate) fn at(&self, kind: &TokenKind) -> bool {
        &self.peek.kind == kind
    }

    /// Consume a punctuation token, failing if the lookahead is anything else.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> Result<Token, BrikError> {
        if self.peek.kind != expected {
            return Err(self.unexpected(&expected.to_string()));
        }
        self.bump()
    }

    pub(crate) fn expect_ident(&mut self, expected: &str) -> Result<(String, usize, usize), BrikError> {
        let Token { kind, line, column } = &self.peek;
        if let TokenKind::Ident(name) = kind {
            let found = (name.clone(), *line, *column);
            self.bump()?;
            Ok(found)
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Enter a block or list opened by the lookahead token.
    pub(crate) fn descend(&mut self) -> Result<(), BrikError> {
        if self.depth >= MAX_DEPTH {
            return Err(BrikError::parse(
                format!("Blocks and lists nested deeper than {} levels", MAX_DEPTH),
                self.peek.line,
                self.peek.column,
                Some("Flatten the structure"),
                204,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Error naming what was expected and the lookahead that was found instead.
    pub(crate) fn unexpected(&self, expected: &str) -> BrikError {
        BrikError::parse(
            format!("Expected {}, found {}", expected, self.peek.kind),
            self.peek.line,
            self.peek.column,
            Some("Check your syntax"),
            201,
        )
    }

    pub fn parse_document(&mut self) -> Result<Document, BrikError> {
        document::parse_document(self)
    }

    pub fn parse_value(&mut self) -> Result<Value, BrikError> {
        value::parse_value(self)
    }
}

/// Parse a complete source text into a document.
pub fn parse(input: &str) -> Result<Document, BrikError> {
    Parser::new(input)?.parse_document()
}

#[cfg(test)]
mod tests;
