// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// The main error type for BRIK lexing, parsing and lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum BrikError {
    /// Raised by the tokenizer: unexpected characters, unterminated
    /// comments or strings, bad escapes.
    LexError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised by the parser when a token does not fit the construct being
    /// parsed, or when duplicate entries cannot be reconciled.
    ParseError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    PathError {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl BrikError {
    pub(crate) fn lex(message: impl Into<String>, line: usize, column: usize, hint: Option<&str>, code: u32) -> Self {
        BrikError::LexError {
            message: message.into(),
            line,
            column,
            hint: hint.map(str::to_owned),
            code: Some(code),
        }
    }

    pub(crate) fn parse(message: impl Into<String>, line: usize, column: usize, hint: Option<&str>, code: u32) -> Self {
        BrikError::ParseError {
            message: message.into(),
            line,
            column,
            hint: hint.map(str::to_owned),
            code: Some(code),
        }
    }

    pub(crate) fn type_error(message: impl Into<String>, hint: Option<&str>, code: u32) -> Self {
        BrikError::TypeError {
            message: message.into(),
            hint: hint.map(str::to_owned),
            code: Some(code),
        }
    }

    /// 1-based line of the offending position, for lex and parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            BrikError::LexError { line, .. } | BrikError::ParseError { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// 1-based column of the offending position, for lex and parse errors.
    pub fn column(&self) -> Option<usize> {
        match self {
            BrikError::LexError { column, .. } | BrikError::ParseError { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            BrikError::LexError { code, .. }
            | BrikError::ParseError { code, .. }
            | BrikError::TypeError { code, .. }
            | BrikError::PathError { code, .. }
            | BrikError::FileError { code, .. } => *code,
        }
    }

    pub fn is_lex_error(&self) -> bool {
        matches!(self, BrikError::LexError { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, BrikError::ParseError { .. })
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for BrikError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrikError::LexError { message, line, column, hint, code } =>
                write!(f, "[BRIK] Lex Error at {}:{}: {}{}", line, column, message, suffix(hint, code)),
            BrikError::ParseError { message, line, column, hint, code } =>
                write!(f, "[BRIK] Parse Error at {}:{}: {}{}", line, column, message, suffix(hint, code)),
            BrikError::TypeError { message, hint, code } =>
                write!(f, "[BRIK] Type Error: {}{}", message, suffix(hint, code)),
            BrikError::PathError { path, hint, code } =>
                write!(f, "[BRIK] Path '{}' not found{}", path, suffix(hint, code)),
            BrikError::FileError { message, path, hint, code } =>
                write!(f, "[BRIK] File Error '{}': {}{}", path, message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for BrikError {}
