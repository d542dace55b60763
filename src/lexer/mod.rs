// License: MIT

use std::fmt;
use std::str::Chars;

use crate::ConfigError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    Ident(String),
    /// Content of a quoted string with `\"` and `\\` already unescaped.
    String(String),
    Int(String),
    Float(String),

    // --- punctuation: . ; = , : [ ] { } ---
    Punct(char),

    Eof,
}

impl Token {
    /// Source-like rendering of the token for error messages.
    pub fn text(&self) -> String {
        match self {
            Token::Ident(s) | Token::Int(s) | Token::Float(s) => s.clone(),
            Token::String(s) => format!("\"{}\"", s),
            Token::Punct(c) => c.to_string(),
            Token::Eof => "EOF".into(),
        }
    }

    pub fn is_punct(&self, c: char) -> bool {
        matches!(self, Token::Punct(p) if *p == c)
    }
}

/// Line and column of a token's first character, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Pull-based tokenizer over a fully materialized input.
///
/// Comments are not skipped here: the section parser asks for
/// [`Lexer::skip_line`] when it sees a `;`.
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

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Next raw character, without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.peek
    }

    /// Scan the next token along with the position it starts at.
    pub fn next_token(&mut self) -> Result<(Token, Position), ConfigError> {
        tokenizer::next_token(self)
    }

    /// Discard everything up to and including the next line break.
    pub fn skip_line(&mut self) {
        scanner::skip_line(self)
    }
}
