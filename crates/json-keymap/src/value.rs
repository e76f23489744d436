//! The tree value every keymap operation reads and writes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Ordered string-keyed mapping. Insertion order is kept so that output
/// produced from the same input is stable.
pub type Mapping = IndexMap<String, NestedValue>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Scalar {
    /// Renders the scalar as a mapping key.
    ///
    /// Strings are used verbatim, numbers use their JSON text and booleans
    /// render as `true`/`false`.
    pub fn to_key(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// JSON-like tree value.
///
/// Serializes to and from the same JSON shape as [`serde_json::Value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum NestedValue {
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<NestedValue>),
    Mapping(Mapping),
}

impl NestedValue {
    /// An empty `Mapping`.
    pub fn empty_mapping() -> Self {
        NestedValue::Mapping(Mapping::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NestedValue::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            NestedValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            NestedValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<NestedValue>> {
        match self {
            NestedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<NestedValue>> {
        match self {
            NestedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NestedValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            NestedValue::Null => "null",
            NestedValue::Scalar(Scalar::String(_)) => "string",
            NestedValue::Scalar(Scalar::Number(_)) => "number",
            NestedValue::Scalar(Scalar::Bool(_)) => "bool",
            NestedValue::Sequence(_) => "sequence",
            NestedValue::Mapping(_) => "mapping",
        }
    }

    /// Returns the value as a mapping, converting it in place first.
    ///
    /// A sequence becomes a mapping keyed by element index; any other
    /// non-mapping value is replaced by an empty mapping.
    pub fn coerce_mapping(&mut self) -> &mut Mapping {
        if !matches!(self, NestedValue::Mapping(_)) {
            let map = match std::mem::take(self) {
                NestedValue::Sequence(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| (idx.to_string(), item))
                    .collect(),
                _ => Mapping::new(),
            };
            *self = NestedValue::Mapping(map);
        }
        match self {
            NestedValue::Mapping(map) => map,
            _ => unreachable!("value was coerced to a mapping"),
        }
    }

    /// Returns the value as a sequence, replacing any non-sequence content
    /// with an empty one.
    pub fn ensure_sequence(&mut self) -> &mut Vec<NestedValue> {
        if !matches!(self, NestedValue::Sequence(_)) {
            *self = NestedValue::Sequence(Vec::new());
        }
        match self {
            NestedValue::Sequence(items) => items,
            _ => unreachable!("value was replaced by a sequence"),
        }
    }
}

impl From<Value> for NestedValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => NestedValue::Null,
            Value::Bool(b) => NestedValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => NestedValue::Scalar(Scalar::Number(n)),
            Value::String(s) => NestedValue::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                NestedValue::Sequence(items.into_iter().map(NestedValue::from).collect())
            }
            Value::Object(map) => NestedValue::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, NestedValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<NestedValue> for Value {
    fn from(value: NestedValue) -> Self {
        match value {
            NestedValue::Null => Value::Null,
            NestedValue::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            NestedValue::Scalar(Scalar::Number(n)) => Value::Number(n),
            NestedValue::Scalar(Scalar::String(s)) => Value::String(s),
            NestedValue::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            NestedValue::Mapping(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for NestedValue {
    fn from(s: &str) -> Self {
        NestedValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for NestedValue {
    fn from(s: String) -> Self {
        NestedValue::Scalar(Scalar::String(s))
    }
}

impl From<bool> for NestedValue {
    fn from(b: bool) -> Self {
        NestedValue::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for NestedValue {
    fn from(n: i64) -> Self {
        NestedValue::Scalar(Scalar::Number(n.into()))
    }
}

impl From<f64> for NestedValue {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(|n| NestedValue::Scalar(Scalar::Number(n)))
            .unwrap_or(NestedValue::Null)
    }
}

impl From<Vec<NestedValue>> for NestedValue {
    fn from(items: Vec<NestedValue>) -> Self {
        NestedValue::Sequence(items)
    }
}

impl From<Mapping> for NestedValue {
    fn from(map: Mapping) -> Self {
        NestedValue::Mapping(map)
    }
}

impl fmt::Display for NestedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self.clone()))
    }
}
