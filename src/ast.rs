// License: MIT

use indexmap::IndexMap;
use serde::Serialize;

/// A parsed option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Short name of the value's kind, used in type mismatch messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Value::List(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        if let Value::Map(entries) = self {
            Some(entries)
        } else {
            None
        }
    }
}

/// A named node of the configuration tree.
///
/// Options and children keep their declaration order, so binding a sequence
/// of sub-sections yields elements in the order they appear in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    name: String,
    options: IndexMap<String, Value>,
    #[serde(rename = "sections")]
    children: IndexMap<String, Section>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            options: IndexMap::new(),
            children: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &IndexMap<String, Value> {
        &self.options
    }

    pub fn children(&self) -> &IndexMap<String, Section> {
        &self.children
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn child(&self, name: &str) -> Option<&Section> {
        self.children.get(name)
    }

    /// Depth-first search for a section by bare name, starting with `self`.
    pub fn find(&self, name: &str) -> Option<&Section> {
        if self.name == name {
            return Some(self);
        }
        self.children.values().find_map(|child| child.find(name))
    }

    /// Case-insensitive option lookup, exact spelling first.
    pub fn lookup_option(&self, key: &str) -> Option<&Value> {
        self.options
            .get(key)
            .or_else(|| find_folded(&self.options, key))
    }

    /// Case-insensitive child lookup, exact spelling first.
    pub fn lookup_child(&self, name: &str) -> Option<&Section> {
        self.children
            .get(name)
            .or_else(|| find_folded(&self.children, name))
    }

    /// Walk down `path`, creating any missing sections on the way.
    pub(crate) fn descend_mut(&mut self, path: &[String]) -> &mut Section {
        path.iter().fold(self, |section, name| {
            section
                .children
                .entry(name.clone())
                .or_insert_with(|| Section::new(name.clone()))
        })
    }

    /// Insert an option, handing the value back if the key is already taken.
    pub(crate) fn insert_option(&mut self, key: String, value: Value) -> Result<(), Value> {
        if self.options.contains_key(&key) {
            return Err(value);
        }
        self.options.insert(key, value);
        Ok(())
    }
}

fn find_folded<'a, V>(map: &'a IndexMap<String, V>, key: &str) -> Option<&'a V> {
    let folded = key.to_lowercase();
    map.iter()
        .find(|(k, _)| k.to_lowercase() == folded)
        .map(|(_, v)| v)
}
