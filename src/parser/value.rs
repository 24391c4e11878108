use super::*;

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, BrikError> {
    match parser.peek() {
        TokenKind::String(_) | TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::Bool(_) => {
            parse_scalar_value(parser)
        }
        TokenKind::LBracket => parse_list_value(parser),
        TokenKind::LBrace => block::parse_block(parser).map(Value::Block),
        _ => Err(parser.unexpected("a value (string, number, boolean, list or block)")),
    }
}

fn parse_scalar_value(parser: &mut Parser) -> Result<Value, BrikError> {
    match parser.bump()?.kind {
        TokenKind::String(s) => Ok(Value::String(s)),
        TokenKind::Int(n) => Ok(Value::Int(n)),
        TokenKind::Float(n) => Ok(Value::Float(n)),
        TokenKind::Bool(b) => Ok(Value::Bool(b)),
        _ => unreachable!(),
    }
}

fn parse_list_value(parser: &mut Parser) -> Result<Value, BrikError> {
    parser.descend()?;
    let list = parse_list_items(parser);
    parser.ascend();
    list
}

/// `'[' ( Value (',' Value)* ','? )? ']'`
fn parse_list_items(parser: &mut Parser) -> Result<Value, BrikError> {
    parser.expect(TokenKind::LBracket)?;
    let mut items = Vec::new();

    if !parser.at(&TokenKind::RBracket) {
        items.push(parse_value(parser)?);
        while parser.at(&TokenKind::Comma) {
            parser.bump()?;
            // trailing comma
            if parser.at(&TokenKind::RBracket) {
                break;
            }
            items.push(parse_value(parser)?);
        }
    }

    if !parser.at(&TokenKind::RBracket) {
        return Err(parser.unexpected("',' or ']'"));
    }
    parser.bump()?;

    Ok(Value::List(items))
}
