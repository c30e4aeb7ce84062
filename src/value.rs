//! Attribute trees carried by scenario resources.
//!
//! Resources arrive from scenario parsing with arbitrary nested data:
//! scalars, ordered sequences and mappings. [`Value`] is the tagged form of
//! that data, and path traversal in the injector is a fold over it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ordered mapping of attribute names to values.
pub type Mapping = IndexMap<String, Value>;

/// A node in a resource attribute tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Look up a key on a mapping value.
    pub fn lookup(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Mapping(map) => map.get(key).ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
                context: self.describe(),
            }),
            _ => Err(Error::KeyNotFound {
                key: key.to_string(),
                context: self.describe(),
            }),
        }
    }

    /// Index into a sequence value. `key` names the sequence in errors.
    ///
    /// Negative positions count from the end.
    pub fn index(&self, key: &str, pos: i64) -> Result<&Value> {
        match self {
            Value::Sequence(items) => {
                let resolved = if pos < 0 { items.len() as i64 + pos } else { pos };
                usize::try_from(resolved)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| Error::IndexOutOfRange {
                        key: key.to_string(),
                        index: pos,
                    })
            }
            _ => Err(Error::KeyNotFound {
                key: format!("{}[{}]", key, pos),
                context: self.describe(),
            }),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Render a scalar for substitution into a string.
    ///
    /// Containers and null have no textual form and return `None`.
    pub fn render_scalar(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    /// Short description used in error messages.
    fn describe(&self) -> String {
        match self {
            Value::Mapping(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                format!("{{{}}}", keys.join(", "))
            }
            Value::Sequence(items) => format!("sequence of {}", items.len()),
            Value::Null => "null".to_string(),
            other => other.render_scalar().unwrap_or_default(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<&[String]> for Value {
    fn from(items: &[String]) -> Self {
        Value::Sequence(items.iter().map(|s| Value::String(s.clone())).collect())
    }
}
