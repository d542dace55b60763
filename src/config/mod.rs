// License: MIT

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::ast::{Section, Value};
use crate::parser;
use crate::ConfigError;

mod access;
mod binder;
mod conversion;
mod helpers;

pub use binder::{parse_str, Bind, Binder, Setting, Shape};
pub use helpers::DEFAULT_SECTION_NAME;

/// A parsed configuration file together with the binding policy used to read
/// it into typed records.
#[derive(Debug, Clone)]
pub struct IniConfig {
    root: Section,
    binder: Binder,
}

impl IniConfig {
    /// Parse a configuration from a string.
    ///
    /// `default_section` names the top-level section: a header carrying that
    /// name reopens it, any other header becomes one of its children.
    pub fn from_str(content: &str, default_section: &str) -> Result<Self, ConfigError> {
        let root = parser::Parser::new(content)?.parse_document(default_section)?;
        Ok(Self {
            root,
            binder: Binder::new(),
        })
    }

    /// Read the whole stream, then parse it.
    pub fn from_reader<R: Read>(mut reader: R, default_section: &str) -> Result<Self, ConfigError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| ConfigError::File {
                path: "<reader>".into(),
                message: format!("Failed to read input: {}", e),
            })?;
        Self::from_str(&content, default_section)
    }

    /// Load a configuration file; the top-level section is named after the
    /// file's stem (`multiplex.ini` → `multiplex`).
    ///
    /// # Example
    /// ```no_run
    /// let config = ini_cfg::IniConfig::from_file("multiplex.ini")?;
    /// # Ok::<(), ini_cfg::ConfigError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::File {
            path: path.display().to_string(),
            message: format!("Failed to read file: {}", e),
        })?;
        Self::from_str(&content, &helpers::section_name_for_path(path))
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.binder = self.binder.strict(strict);
        self
    }

    pub fn is_strict(&self) -> bool {
        self.binder.is_strict()
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn into_root(self) -> Section {
        self.root
    }
}

/// Parse `input` into a section tree rooted at `default_name`.
pub fn parse(input: &str, default_name: &str) -> Result<Section, ConfigError> {
    parser::Parser::new(input)?.parse_document(default_name)
}

/// Read `reader` to the end and parse it.
pub fn parse_reader<R: Read>(reader: R, default_name: &str) -> Result<Section, ConfigError> {
    IniConfig::from_reader(reader, default_name).map(IniConfig::into_root)
}

/// Bind the options and sub-sections of `tree` onto `target`.
pub fn bind<T: Bind + ?Sized>(tree: &Section, target: &mut T, strict: bool) -> Result<(), ConfigError> {
    Binder::new().strict(strict).bind(tree, target)
}

/// Bind the section named `name`, searched depth-first from `tree`.
pub fn bind_section<T: Bind + ?Sized>(
    tree: &Section,
    name: &str,
    target: &mut T,
    strict: bool,
) -> Result<(), ConfigError> {
    Binder::new().strict(strict).bind_section(tree, name, target)
}

impl Value {
    /// Convert this value as a field of type `T` would be.
    pub fn to<T: Setting>(&self) -> Result<T, ConfigError> {
        T::from_value(self)
    }
}

#[cfg(test)]
mod tests;
