use super::*;
use super::scanner::{bump, peek_second, skip_whitespace};

const PUNCTUATION: &[char] = &['.', ';', '=', ',', ':', '[', ']', '{', '}'];

pub(super) fn next_token(lexer: &mut Lexer) -> Result<(Token, Position), ConfigError> {
    skip_whitespace(lexer);
    let start = lexer.position();

    let token = match lexer.peek {
        Some('"') => tokenize_string(lexer, start)?,
        Some('-' | '.') if peek_second(lexer).is_some_and(|c| c.is_ascii_digit()) => {
            tokenize_number(lexer, start)?
        }
        Some(c) if c.is_ascii_digit() => tokenize_number(lexer, start)?,
        Some(c) if c.is_alphabetic() || c == '_' => tokenize_identifier(lexer),
        Some(c) if PUNCTUATION.contains(&c) => {
            bump(lexer);
            Token::Punct(c)
        }
        Some(ch) => {
            bump(lexer);
            return Err(ConfigError::UnexpectedCharacter {
                character: ch,
                line: start.line,
                column: start.column,
            });
        }
        None => Token::Eof,
    };

    Ok((token, start))
}

fn tokenize_string(lexer: &mut Lexer, start: Position) -> Result<Token, ConfigError> {
    bump(lexer); // opening quote
    let mut content = String::new();

    loop {
        match bump(lexer) {
            Some('"') => break,
            Some('\\') => match lexer.peek {
                Some(escaped @ ('"' | '\\')) => {
                    bump(lexer);
                    content.push(escaped);
                }
                Some('\n') | None => {
                    return Err(ConfigError::UnclosedString {
                        line: start.line,
                        column: start.column,
                    });
                }
                // Any other escape is kept as written.
                Some(other) => {
                    bump(lexer);
                    content.push('\\');
                    content.push(other);
                }
            },
            Some('\n') | None => {
                return Err(ConfigError::UnclosedString {
                    line: start.line,
                    column: start.column,
                });
            }
            Some(ch) => content.push(ch),
        }
    }

    Ok(Token::String(content))
}

fn tokenize_number(lexer: &mut Lexer, start: Position) -> Result<Token, ConfigError> {
    let mut num = String::new();
    let mut is_float = false;

    if lexer.peek == Some('-') {
        bump(lexer);
        num.push('-');
    }
    push_digits(lexer, &mut num);

    if lexer.peek == Some('.') {
        is_float = true;
        bump(lexer);
        num.push('.');
        push_digits(lexer, &mut num);
    }

    if let Some(e @ ('e' | 'E')) = lexer.peek {
        is_float = true;
        bump(lexer);
        num.push(e);
        if let Some(sign @ ('+' | '-')) = lexer.peek {
            bump(lexer);
            num.push(sign);
        }
        if !lexer.peek.is_some_and(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidNumber {
                literal: num,
                line: start.line,
                column: start.column,
            });
        }
        push_digits(lexer, &mut num);
    }

    Ok(if is_float { Token::Float(num) } else { Token::Int(num) })
}

fn push_digits(lexer: &mut Lexer, num: &mut String) {
    while let Some(ch) = lexer.peek {
        if ch.is_ascii_digit() {
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }
}

fn tokenize_identifier(lexer: &mut Lexer) -> Token {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    Token::Ident(ident)
}
