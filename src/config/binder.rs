// License: MIT

use std::fmt::Display;
use std::str::FromStr;

use tracing::debug;

use crate::ast::{Section, Value};
use crate::ConfigError;

/// How a field type relates to the section tree when no option matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Only ever bound from an option.
    Scalar,
    /// A nested record bound from the same-named sub-section.
    Record,
    /// A sequence of records bound from every sub-section of the same-named
    /// sub-section, in declaration order.
    Records,
    /// A keyed mapping. Only bound from a map option; sub-sections are skipped.
    Mapping,
}

/// A record whose fields can be filled from a [`Section`].
///
/// Usually implemented with `#[derive(Bind)]`, which visits the fields in
/// declaration order and calls [`Binder::bind_field`] for each of them.
pub trait Bind {
    fn bind(&mut self, section: &Section, binder: &Binder) -> Result<(), ConfigError>;
}

/// A type that can be stored in a bound field.
pub trait Setting: Sized {
    const SHAPE: Shape = Shape::Scalar;

    /// Convert an option value. The value's kind must match the type's.
    fn from_value(value: &Value) -> Result<Self, ConfigError>;

    /// Build a fresh instance from a sub-section.
    fn from_section(section: &Section, binder: &Binder) -> Result<Self, ConfigError> {
        let _ = binder;
        Err(ConfigError::TypeMismatch {
            field: String::new(),
            expected: std::any::type_name::<Self>().to_string(),
            found: format!("section {:?}", section.name()),
        })
    }

    /// Merge a sub-section into an existing slot. Replaces the slot by default.
    fn bind_section(&mut self, section: &Section, binder: &Binder) -> Result<(), ConfigError> {
        *self = Self::from_section(section, binder)?;
        Ok(())
    }
}

/// Maps section trees onto [`Bind`] targets.
///
/// In non-strict mode (the default) missing options and type mismatches are
/// skipped, leaving the field as the caller initialized it. Strict mode turns
/// them into errors; fields bound before the failure keep their new values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binder {
    strict: bool,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn bind<T: Bind + ?Sized>(&self, section: &Section, target: &mut T) -> Result<(), ConfigError> {
        target.bind(section, self)
    }

    /// Bind the first section named `name` found depth-first below `tree`.
    pub fn bind_section<T: Bind + ?Sized>(
        &self,
        tree: &Section,
        name: &str,
        target: &mut T,
    ) -> Result<(), ConfigError> {
        let section = tree.find(name).ok_or_else(|| ConfigError::NotFound {
            name: name.to_string(),
        })?;
        target.bind(section, self)
    }

    /// Bind one field, looking it up case-insensitively first among the
    /// section's options, then among its sub-sections.
    pub fn bind_field<T: Setting>(&self, section: &Section, field: &str, slot: &mut T) -> Result<(), ConfigError> {
        if let Some(value) = section.lookup_option(field) {
            return match T::from_value(value) {
                Ok(converted) => {
                    *slot = converted;
                    Ok(())
                }
                Err(e) => self.absorb(e.in_field(field)),
            };
        }

        match T::SHAPE {
            Shape::Record | Shape::Records => match section.lookup_child(field) {
                Some(child) => slot
                    .bind_section(child, self)
                    .or_else(|e| self.absorb(e.in_field(field))),
                None => self.missing(section, field),
            },
            Shape::Mapping => {
                debug!(section = section.name(), field, "mapping field without option, skipped");
                Ok(())
            }
            Shape::Scalar => self.missing(section, field),
        }
    }

    /// Bind a field through its `FromStr` implementation.
    ///
    /// Only string options are parsed; parse failures always propagate.
    pub fn bind_parsed<T>(&self, section: &Section, field: &str, slot: &mut T) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match section.lookup_option(field) {
            Some(value) => match parse_str(value) {
                Ok(parsed) => {
                    *slot = parsed;
                    Ok(())
                }
                Err(e) => self.absorb(e.in_field(field)),
            },
            None => self.missing(section, field),
        }
    }

    fn missing(&self, section: &Section, field: &str) -> Result<(), ConfigError> {
        self.absorb(ConfigError::MissingField {
            field: field.to_string(),
            section: section.name().to_string(),
        })
    }

    fn absorb(&self, err: ConfigError) -> Result<(), ConfigError> {
        if self.strict || !err.is_recoverable() {
            return Err(err);
        }
        debug!(error = %err, "skipping field");
        Ok(())
    }
}

/// Run the `FromStr` capability on a string value.
pub fn parse_str<T>(value: &Value) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Value::String(s) => s.parse().map_err(|e: T::Err| ConfigError::Capability {
            field: String::new(),
            message: e.to_string(),
        }),
        other => Err(ConfigError::mismatch("string", other)),
    }
}

/// Declare that a type is read from string options through its `FromStr`
/// implementation.
///
/// ```
/// use ini_cfg::from_str_setting;
///
/// #[derive(Debug, PartialEq)]
/// struct Level(u8);
///
/// impl std::str::FromStr for Level {
///     type Err = String;
///     fn from_str(s: &str) -> Result<Self, String> {
///         s.strip_prefix('L').and_then(|n| n.parse().ok()).map(Level).ok_or_else(|| format!("bad level {s}"))
///     }
/// }
///
/// from_str_setting!(Level);
/// ```
#[macro_export]
macro_rules! from_str_setting {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Setting for $ty {
                fn from_value(value: &$crate::Value) -> ::core::result::Result<Self, $crate::ConfigError> {
                    $crate::config::parse_str(value)
                }
            }
        )+
    };
}
