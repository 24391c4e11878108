// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::Chars;

use crate::BrikError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // --- structure ---
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Equals,
    Arrow,

    // --- literals ---
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Ident(String),

    Eof,
}

/// A token together with the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Int(n) => write!(f, "number {}", n),
            TokenKind::Float(n) => write!(f, "number {}", n),
            TokenKind::Bool(b) => write!(f, "boolean {}", b),
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 1,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Produce the next token, or `Eof` once the input is exhausted.
    /// Calling again after `Eof` keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token, BrikError> {
        tokenizer::next_token(self)
    }

    /// Drain the whole input into a token vector ending with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, BrikError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}
