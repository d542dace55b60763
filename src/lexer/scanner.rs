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

/// Look one character past the peeked one.
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

pub(super) fn skip_whitespace(lexer: &mut Lexer) {
    while let Some(' ' | '\t' | '\r' | '\n') = lexer.peek {
        bump(lexer);
    }
}

pub(super) fn skip_line(lexer: &mut Lexer) {
    while let Some(ch) = bump(lexer) {
        if ch == '\n' {
            break;
        }
    }
}
