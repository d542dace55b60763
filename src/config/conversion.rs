// License: MIT

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use indexmap::IndexMap;

use super::binder::{Binder, Setting, Shape};
use crate::ast::{Section, Value};
use crate::{from_str_setting, ConfigError};

impl Setting for String {
    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConfigError::mismatch("string", other)),
        }
    }
}

impl Setting for bool {
    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(ConfigError::mismatch("bool", other)),
        }
    }
}

impl Setting for i64 {
    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Int(n) => Ok(*n),
            other => Err(ConfigError::mismatch("integer", other)),
        }
    }
}

macro_rules! int_setting {
    ($($ty:ty),+) => {
        $(
            impl Setting for $ty {
                fn from_value(value: &Value) -> Result<Self, ConfigError> {
                    let n = i64::from_value(value)?;
                    <$ty>::try_from(n).map_err(|_| ConfigError::OutOfRange {
                        field: String::new(),
                        value: n.to_string(),
                        target: stringify!($ty),
                    })
                }
            }
        )+
    };
}

int_setting!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

impl Setting for f64 {
    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Float(n) => Ok(*n),
            other => Err(ConfigError::mismatch("float", other)),
        }
    }
}

impl Setting for f32 {
    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        f64::from_value(value).map(|n| n as f32)
    }
}

/// The raw value, whatever its kind.
impl Setting for Value {
    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        Ok(value.clone())
    }
}

from_str_setting!(PathBuf, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

/// `null` leaves the slot empty; anything else is converted as `T`.
impl<T: Setting> Setting for Option<T> {
    const SHAPE: Shape = T::SHAPE;

    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }

    fn from_section(section: &Section, binder: &Binder) -> Result<Self, ConfigError> {
        T::from_section(section, binder).map(Some)
    }
}

/// A list option, or, when `T` is a record, one element per sub-section.
impl<T: Setting> Setting for Vec<T> {
    const SHAPE: Shape = match T::SHAPE {
        Shape::Record => Shape::Records,
        _ => Shape::Scalar,
    };

    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(ConfigError::mismatch("list", other)),
        }
    }

    fn from_section(section: &Section, binder: &Binder) -> Result<Self, ConfigError> {
        let mut out = Vec::new();
        out.bind_section(section, binder)?;
        Ok(out)
    }

    /// Appends to what the slot already holds.
    fn bind_section(&mut self, section: &Section, binder: &Binder) -> Result<(), ConfigError> {
        for child in section.children().values() {
            self.push(T::from_section(child, binder)?);
        }
        Ok(())
    }
}

fn map_entries<'a, T: Setting>(
    value: &'a Value,
) -> Result<impl Iterator<Item = Result<(String, T), ConfigError>> + 'a, ConfigError> {
    match value {
        Value::Map(entries) => Ok(entries
            .iter()
            .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))),
        other => Err(ConfigError::mismatch("map", other)),
    }
}

impl<T: Setting, S: BuildHasher + Default> Setting for HashMap<String, T, S> {
    const SHAPE: Shape = Shape::Mapping;

    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        map_entries::<T>(value)?.collect()
    }
}

impl<T: Setting> Setting for BTreeMap<String, T> {
    const SHAPE: Shape = Shape::Mapping;

    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        map_entries::<T>(value)?.collect()
    }
}

impl<T: Setting, S: BuildHasher + Default> Setting for IndexMap<String, T, S> {
    const SHAPE: Shape = Shape::Mapping;

    fn from_value(value: &Value) -> Result<Self, ConfigError> {
        map_entries::<T>(value)?.collect()
    }
}
