use super::*;
use super::scanner::{bump, peek_second, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, BrikError> {
    skip_whitespace_and_comments(lexer)?;

    let (line, column) = (lexer.line, lexer.column);
    let kind = match lexer.peek {
        Some('{') => tokenize_symbol(lexer, TokenKind::LBrace),
        Some('}') => tokenize_symbol(lexer, TokenKind::RBrace),
        Some('[') => tokenize_symbol(lexer, TokenKind::LBracket),
        Some(']') => tokenize_symbol(lexer, TokenKind::RBracket),
        Some(',') => tokenize_symbol(lexer, TokenKind::Comma),
        Some('=') => tokenize_symbol(lexer, TokenKind::Equals),
        Some('-') => tokenize_arrow_or_number(lexer)?,
        Some('"') => tokenize_string(lexer)?,
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer)?,
        Some(c) if is_ident_start(c) => tokenize_identifier_or_bool(lexer),
        Some(ch) => return Err(unexpected_char(lexer, ch)),
        None => TokenKind::Eof,
    };

    Ok(Token { kind, line, column })
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn tokenize_symbol(lexer: &mut Lexer, kind: TokenKind) -> TokenKind {
    bump(lexer);
    kind
}

fn tokenize_arrow_or_number(lexer: &mut Lexer) -> Result<TokenKind, BrikError> {
    match peek_second(lexer) {
        Some('>') => {
            bump(lexer);
            bump(lexer);
            Ok(TokenKind::Arrow)
        }
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer),
        _ => Err(unexpected_char(lexer, '-')),
    }
}

fn tokenize_string(lexer: &mut Lexer) -> Result<TokenKind, BrikError> {
    let (line, column) = (lexer.line, lexer.column);
    bump(lexer); // opening quote

    let unterminated = || {
        BrikError::lex(
            "Unterminated string literal",
            line,
            column,
            Some("Close the string with a double quote"),
            103,
        )
    };

    let mut content = String::new();
    loop {
        match bump(lexer) {
            Some('"') => return Ok(TokenKind::String(content)),
            Some('\\') => {
                let (esc_line, esc_column) = (lexer.line, lexer.column - 1);
                let next_ch = bump(lexer).ok_or_else(unterminated)?;
                match next_ch {
                    'n' => content.push('\n'),
                    't' => content.push('\t'),
                    'r' => content.push('\r'),
                    'a' => content.push('\u{7}'),
                    'b' => content.push('\u{8}'),
                    'v' => content.push('\u{b}'),
                    'f' => content.push('\u{c}'),
                    '\\' => content.push('\\'),
                    '"' => content.push('"'),
                    '\'' => content.push('\''),
                    'x' => content.push(tokenize_hex_escape(lexer, 'x', 2, esc_line, esc_column)?),
                    'u' => content.push(tokenize_hex_escape(lexer, 'u', 4, esc_line, esc_column)?),
                    '0'..='7' => content.push(tokenize_octal_escape(lexer, next_ch)),
                    // Unknown escapes are kept verbatim.
                    other => {
                        content.push('\\');
                        content.push(other);
                    }
                }
            }
            Some(ch) => content.push(ch),
            None => return Err(unterminated()),
        }
    }
}

/// Decode the fixed-width hex digits of a `\xHH` or `\uXXXX` escape.
fn tokenize_hex_escape(
    lexer: &mut Lexer,
    marker: char,
    width: usize,
    line: usize,
    column: usize,
) -> Result<char, BrikError> {
    let mut digits = String::with_capacity(width);
    for _ in 0..width {
        match lexer.peek {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(c);
                bump(lexer);
            }
            _ => break,
        }
    }

    let example = if width == 2 { "e1" } else { "00e1" };
    u32::from_str_radix(&digits, 16)
        .ok()
        .filter(|_| digits.len() == width)
        .and_then(char::from_u32)
        .ok_or_else(|| {
            BrikError::lex(
                format!("Invalid escape '\\{}{}'", marker, digits),
                line,
                column,
                Some(format!(
                    "Use exactly {} hex digits naming a valid code point, e.g. \\{}{}",
                    width,
                    marker,
                    example
                ).as_str()),
                104,
            )
        })
}

/// Decode `\N`, `\NN` or `\NNN` in octal; `first` is the digit already read.
fn tokenize_octal_escape(lexer: &mut Lexer, first: char) -> char {
    let mut code = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match lexer.peek.and_then(|c| c.to_digit(8)) {
            Some(d) => {
                code = code * 8 + d;
                bump(lexer);
            }
            None => break,
        }
    }
    // At most 0o777, always a valid scalar value.
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn tokenize_number(lexer: &mut Lexer) -> Result<TokenKind, BrikError> {
    let (line, column) = (lexer.line, lexer.column);
    let mut num = String::new();

    if lexer.peek == Some('-') {
        num.push('-');
        bump(lexer);
    }
    take_digits(lexer, &mut num);

    // A '.' belongs to the literal only when digits follow it.
    let is_float = lexer.peek == Some('.') && peek_second(lexer).is_some_and(|c| c.is_ascii_digit());
    if is_float {
        num.push('.');
        bump(lexer);
        take_digits(lexer, &mut num);

        return match num.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(TokenKind::Float(n)),
            _ => Err(out_of_range(&num, line, column)),
        };
    }

    num.parse::<i64>()
        .map(TokenKind::Int)
        .map_err(|_| out_of_range(&num, line, column))
}

fn take_digits(lexer: &mut Lexer, num: &mut String) {
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }
}

fn out_of_range(num: &str, line: usize, column: usize) -> BrikError {
    BrikError::lex(
        format!("Numeric literal '{}' is out of range", num),
        line,
        column,
        None,
        105,
    )
}

/// `true`/`false` are booleans only as whole words, so `truefoo` stays an
/// identifier.
fn tokenize_identifier_or_bool(lexer: &mut Lexer) -> TokenKind {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if is_ident_char(ch) {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    match ident.as_str() {
        "true" => TokenKind::Bool(true),
        "false" => TokenKind::Bool(false),
        _ => TokenKind::Ident(ident),
    }
}

fn unexpected_char(lexer: &Lexer, ch: char) -> BrikError {
    BrikError::lex(
        format!("Unexpected character '{}'", ch),
        lexer.line,
        lexer.column,
        Some("Unexpected character in input"),
        101,
    )
}
