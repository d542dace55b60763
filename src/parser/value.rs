use super::*;

use indexmap::IndexMap;

/// Parse an option's right-hand side, leaving the parser on the token after it.
///
/// Every list and map element must be followed by a comma, the last one
/// included: `[1, 2,]` is valid, `[1, 2]` is not.
pub(super) fn parse_option_value(parser: &mut Parser) -> Result<Value, ConfigError> {
    match parser.token() {
        Token::Ident(_) => parse_literal_value(parser),
        Token::String(_) => parse_string_value(parser),
        Token::Int(_) => parse_int_value(parser),
        Token::Float(_) => parse_float_value(parser),
        Token::Punct('[') => parse_list_value(parser),
        Token::Punct('{') => parse_map_value(parser),
        _ => Err(parser.unexpected("option's value")),
    }
}

fn parse_literal_value(parser: &mut Parser) -> Result<Value, ConfigError> {
    let pos = parser.position();
    let Token::Ident(ident) = parser.bump()? else {
        unreachable!("dispatched on an identifier")
    };

    match ident.as_str() {
        "true" | "yes" => Ok(Value::Bool(true)),
        "false" | "no" => Ok(Value::Bool(false)),
        "null" => Ok(Value::Null),
        _ => Err(ConfigError::UnknownIdentifier {
            ident,
            line: pos.line,
            column: pos.column,
        }),
    }
}

fn parse_string_value(parser: &mut Parser) -> Result<Value, ConfigError> {
    let Token::String(s) = parser.bump()? else {
        unreachable!("dispatched on a string")
    };
    Ok(Value::String(s))
}

fn parse_int_value(parser: &mut Parser) -> Result<Value, ConfigError> {
    let pos = parser.position();
    let Token::Int(literal) = parser.bump()? else {
        unreachable!("dispatched on an integer")
    };
    match literal.parse::<i64>() {
        Ok(n) => Ok(Value::Int(n)),
        Err(_) => Err(ConfigError::InvalidNumber {
            literal,
            line: pos.line,
            column: pos.column,
        }),
    }
}

fn parse_float_value(parser: &mut Parser) -> Result<Value, ConfigError> {
    let pos = parser.position();
    let Token::Float(literal) = parser.bump()? else {
        unreachable!("dispatched on a float")
    };
    match literal.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Value::Float(n)),
        _ => Err(ConfigError::InvalidNumber {
            literal,
            line: pos.line,
            column: pos.column,
        }),
    }
}

fn parse_list_value(parser: &mut Parser) -> Result<Value, ConfigError> {
    parser.bump()?; // consume [
    let mut items = Vec::new();

    while !parser.token().is_punct(']') {
        items.push(parse_option_value(parser)?);
        parser.expect_punct(',')?;
    }
    parser.bump()?; // consume ]

    Ok(Value::List(items))
}

fn parse_map_value(parser: &mut Parser) -> Result<Value, ConfigError> {
    parser.bump()?; // consume {
    let mut entries = IndexMap::new();

    while !parser.token().is_punct('}') {
        let pos = parser.position();
        let key = match parse_option_value(parser)? {
            Value::String(key) => key,
            other => {
                return Err(ConfigError::syntax(
                    "map keys must be strings",
                    other.kind(),
                    pos,
                ));
            }
        };
        parser.expect_punct(':')?;
        let value = parse_option_value(parser)?;
        parser.expect_punct(',')?;

        // A repeated key replaces the earlier entry.
        entries.insert(key, value);
    }
    parser.bump()?; // consume }

    Ok(Value::Map(entries))
}
