// License: MIT

use thiserror::Error;

/// The main error type for parsing and binding configuration files.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Raised when the parser meets a token it did not expect, e.g. a missing
    /// `]` after a section header or an identifier where a value should be.
    #[error("syntax error at {line}:{column}: expected {expected}, got {found:?}")]
    Syntax {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    #[error("unexpected character '{character}' at {line}:{column}")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    /// Raised when a string literal is not closed before the end of its line.
    #[error("unclosed string starting at {line}:{column}")]
    UnclosedString { line: usize, column: usize },
    #[error("invalid number {literal:?} at {line}:{column}")]
    InvalidNumber {
        literal: String,
        line: usize,
        column: usize,
    },
    /// A bare identifier used as a value that is not one of
    /// `true`, `yes`, `false`, `no` or `null`.
    #[error("unknown identifier {ident:?} at {line}:{column}")]
    UnknownIdentifier {
        ident: String,
        line: usize,
        column: usize,
    },
    #[error("duplicate section: {path:?} already defined")]
    DuplicateSection { path: String },
    #[error("duplicate option: {option:?} already defined in section {section:?}")]
    DuplicateOption { option: String, section: String },
    #[error("the default top-level section name must not be empty")]
    EmptySectionName,
    #[error("mismatched type for {field:?}: expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    #[error("value {value} for {field:?} is out of range for {target}")]
    OutOfRange {
        field: String,
        value: String,
        target: &'static str,
    },
    /// Strict mode only: a field has neither an option nor a sub-section.
    #[error("missing option/section {field:?} in section {section:?}")]
    MissingField { field: String, section: String },
    /// A `FromStr` conversion failed; the message is the parser's own.
    #[error("{field:?}: {message}")]
    Capability { field: String, message: String },
    #[error("section {name:?} not found")]
    NotFound { name: String },
    #[error("file error {path:?}: {message}")]
    File { path: String, message: String },
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

impl ConfigError {
    pub(crate) fn syntax(expected: impl Into<String>, found: impl Into<String>, pos: crate::lexer::Position) -> Self {
        ConfigError::Syntax {
            expected: expected.into(),
            found: found.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    pub(crate) fn mismatch(expected: impl Into<String>, value: &crate::Value) -> Self {
        ConfigError::TypeMismatch {
            field: String::new(),
            expected: expected.into(),
            found: value.kind().to_string(),
        }
    }

    /// Whether a non-strict binder may skip the field that raised this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConfigError::TypeMismatch { .. }
                | ConfigError::OutOfRange { .. }
                | ConfigError::MissingField { .. }
        )
    }

    /// Attach a field name to binding errors raised below the field level.
    ///
    /// Errors that already name a field keep the innermost one.
    pub(crate) fn in_field(mut self, name: &str) -> Self {
        match &mut self {
            ConfigError::TypeMismatch { field, .. }
            | ConfigError::OutOfRange { field, .. }
            | ConfigError::Capability { field, .. }
                if field.is_empty() =>
            {
                *field = name.to_string();
            }
            _ => {}
        }
        self
    }
}
