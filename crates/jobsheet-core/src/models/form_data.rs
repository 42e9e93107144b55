//! Open-ended submission data.
//!
//! Form payloads have no server-side schema: the key set depends on which
//! form the client rendered. Most values are strings (query strings, simple
//! forms), but the material list posts nested objects and row arrays, so the
//! map holds raw JSON values and the accessors below apply the loose
//! coercions existing clients depend on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(Map<String, Value>);

impl FormData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a value by key, falling back to a dotted path through nested
    /// objects (`geyser.size`).
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(key) {
            return Some(value);
        }
        let mut segments = key.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Text value of a key. Empty strings, `false`, `null`, arrays and
    /// objects are treated as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }

    /// Loose truthiness: empty strings, zero, `false` and `null` are false.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// Row objects stored under `key`. Non-object rows become empty rows so
    /// that row positions are preserved.
    pub fn rows(&self, key: &str) -> Vec<FormData> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => FormData(map.clone()),
                    _ => FormData::new(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Integer list stored under `key`, either as a JSON array or as a string
    /// holding one (the query-string encoding). Malformed input yields an
    /// empty list; non-integer entries are dropped.
    pub fn indices(&self, key: &str) -> Vec<u64> {
        let parsed;
        let items = match self.get(key) {
            Some(Value::Array(items)) => items,
            Some(Value::String(s)) => {
                parsed = serde_json::from_str::<Vec<Value>>(s).unwrap_or_default();
                &parsed
            }
            _ => return Vec::new(),
        };
        items.iter().filter_map(Value::as_u64).collect()
    }
}

impl From<Map<String, Value>> for FormData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, String>> for FormData {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
