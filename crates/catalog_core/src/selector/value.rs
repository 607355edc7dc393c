//! Arbitrary nested selector values (e.g. tag-based subnet selection).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A nested key/value selector as supplied by the placement request.
///
/// Maps are unordered: two maps holding the same entries are the same
/// selector regardless of insertion or iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<SelectorValue>),
    Map(HashMap<String, SelectorValue>),
}

impl SelectorValue {
    /// Build a map selector from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<SelectorValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        SelectorValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the string entries of a flat map selector.
    ///
    /// Non-string values and nested structures are skipped. Used by simple
    /// tag-matching resolvers.
    pub fn string_entries(&self) -> Vec<(&str, &str)> {
        match self {
            SelectorValue::Map(entries) => entries
                .iter()
                .filter_map(|(k, v)| match v {
                    SelectorValue::String(s) => Some((k.as_str(), s.as_str())),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for SelectorValue {
    fn default() -> Self {
        SelectorValue::Map(HashMap::new())
    }
}

impl From<&str> for SelectorValue {
    fn from(value: &str) -> Self {
        SelectorValue::String(value.to_string())
    }
}

impl From<String> for SelectorValue {
    fn from(value: String) -> Self {
        SelectorValue::String(value)
    }
}

impl From<bool> for SelectorValue {
    fn from(value: bool) -> Self {
        SelectorValue::Bool(value)
    }
}

impl From<i64> for SelectorValue {
    fn from(value: i64) -> Self {
        SelectorValue::Int(value)
    }
}

impl From<u64> for SelectorValue {
    fn from(value: u64) -> Self {
        SelectorValue::UInt(value)
    }
}

impl From<f64> for SelectorValue {
    fn from(value: f64) -> Self {
        SelectorValue::Float(value)
    }
}

impl<T: Into<SelectorValue>> From<Vec<T>> for SelectorValue {
    fn from(values: Vec<T>) -> Self {
        SelectorValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<HashMap<String, SelectorValue>> for SelectorValue {
    fn from(entries: HashMap<String, SelectorValue>) -> Self {
        SelectorValue::Map(entries)
    }
}
