//! Decoded parameter mappings and their stored JSON form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded key-value parameter mapping
///
/// Records keep parameters as raw JSON text. `ParamMap` is the decoded view
/// handed to providers. Keys are kept sorted so the encoded form is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap(BTreeMap<String, Value>);

impl ParamMap {
    /// Creates an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Decodes stored parameter text
    ///
    /// Empty, malformed or non-object input yields an empty mapping.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::new();
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => Self(object.into_iter().collect()),
            Ok(other) => {
                tracing::debug!("Stored parameters are not an object ({other}), treating as empty");
                Self::new()
            }
            Err(e) => {
                tracing::debug!("Malformed stored parameters, treating as empty: {e}");
                Self::new()
            }
        }
    }

    /// Encodes the mapping as compact JSON with sorted keys
    #[must_use]
    pub fn encode(&self) -> String {
        // A string-keyed map of JSON values always serializes
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    /// Gets a value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Gets a value as a string slice, if it is a string
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Sets a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Sets a value and returns the mapping
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns true if a key is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns true if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over all key-value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, Value>> for ParamMap {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}
