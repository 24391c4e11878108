use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 1;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// The character after the current one, without consuming anything
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Skip whitespace, `//` line comments and `/* */` block comments until
/// none of them can be consumed at the current position.
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) -> Result<(), BrikError> {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                bump(lexer);
            }
            '/' if peek_second(lexer) == Some('/') => {
                while let Some(ch) = lexer.peek {
                    if ch == '\n' {
                        break;
                    }
                    bump(lexer);
                }
            }
            '/' if peek_second(lexer) == Some('*') => skip_block_comment(lexer)?,
            _ => break,
        }
    }
    Ok(())
}

fn skip_block_comment(lexer: &mut Lexer) -> Result<(), BrikError> {
    let (line, column) = (lexer.line, lexer.column);
    bump(lexer); // '/'
    bump(lexer); // '*'

    // Not nestable: the first "*/" closes the comment.
    loop {
        match bump(lexer) {
            Some('*') if lexer.peek == Some('/') => {
                bump(lexer);
                return Ok(());
            }
            Some(_) => {}
            None => {
                return Err(BrikError::lex(
                    "Unterminated block comment",
                    line,
                    column,
                    Some("Close the comment with */"),
                    102,
                ));
            }
        }
    }
}
