// License: MIT

use std::collections::HashSet;

use crate::ast::{Section, Value};
use crate::lexer::{Lexer, Position, Token};
use crate::ConfigError;

mod section;
mod value;

/// Recursive-descent parser turning configuration text into a [`Section`] tree.
///
/// The parser always holds the current token; `bump` replaces it with the next
/// one. Nothing past the current token has been scanned, which lets comments
/// be skipped at the character level.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    pos: Position,
    /// Header paths declared so far, relative to the top-level section.
    declared: HashSet<Vec<String>>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, ConfigError> {
        let mut lexer = Lexer::new(input);
        let (token, pos) = lexer.next_token()?;
        Ok(Self {
            lexer,
            token,
            pos,
            declared: HashSet::new(),
        })
    }

    pub(crate) fn bump(&mut self) -> Result<Token, ConfigError> {
        let (next, pos) = self.lexer.next_token()?;
        self.pos = pos;
        Ok(std::mem::replace(&mut self.token, next))
    }

    pub(crate) fn token(&self) -> &Token {
        &self.token
    }

    pub(crate) fn position(&self) -> Position {
        self.pos
    }

    /// Consume the current token if it is the punctuation `c`.
    pub(crate) fn expect_punct(&mut self, c: char) -> Result<(), ConfigError> {
        if !self.token.is_punct(c) {
            return Err(self.unexpected(c.to_string()));
        }
        self.bump()?;
        Ok(())
    }

    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<String, ConfigError> {
        let Token::Ident(name) = &self.token else {
            return Err(self.unexpected(what));
        };
        let name = name.clone();
        self.bump()?;
        Ok(name)
    }

    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ConfigError {
        ConfigError::syntax(expected, self.token.text(), self.pos)
    }

    /// Skip any number of `;` comments, each running to the end of its line.
    pub(crate) fn skip_comments(&mut self) -> Result<(), ConfigError> {
        while self.token.is_punct(';') {
            self.lexer.skip_line();
            self.bump()?;
        }
        Ok(())
    }

    /// Parse the whole input into a tree rooted at `default_name`.
    pub fn parse_document(&mut self, default_name: &str) -> Result<Section, ConfigError> {
        section::parse_document(self, default_name)
    }

    /// Parse a single option value starting at the current token.
    pub fn parse_value(&mut self) -> Result<Value, ConfigError> {
        value::parse_option_value(self)
    }
}
