//! Named parameters of a modification descriptor.

use std::collections::BTreeMap;

use crate::{Key, Value};

/// Named parameters carried by a queued edit.
///
/// A missing key and a key holding `Value::Null` are different things:
/// operations treat a missing key as "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: BTreeMap<String, Value>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None`.
    pub fn with_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a parameter as a string slice.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns true if the key was supplied (even with a null value).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameters were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convert into a map value (used when a whole descriptor is handed to a
    /// constructor as a single argument).
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.entries
                .iter()
                .map(|(k, v)| (Key::String(k.clone()), v.clone()))
                .collect(),
        )
    }

    /// Build parameters from a map value. String keys become parameter
    /// names; integer keys and non-map values are ignored.
    pub fn from_value(value: &Value) -> Self {
        let mut params = Params::new();
        if let Some(entries) = value.as_map() {
            for (key, value) in entries {
                if let Key::String(name) = key {
                    params.insert(name.clone(), value.clone());
                }
            }
        }
        params
    }
}

/// Helper macro to create parameter maps.
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Params::new()$(.with($key, $value))+
    };
}
