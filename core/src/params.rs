//! Named parameter container for the query string and the form body.
//!
//! Values are flattened to strings on insertion: scalars keep their plain text
//! form (`true`, `42`, `hello`) and composite values (lists, objects) are
//! stored as their JSON text. The wire format never carries anything else.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Ordered map of parameter name to flattened value. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// `null` values are ignored, so an unset optional never reaches the wire.
    pub fn set<V: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &V) -> Result<&mut Self> {
        let value = serde_json::to_value(value).map_err(Error::Serialization)?;
        self.set_value(key, value)
    }

    pub(crate) fn set_value(&mut self, key: impl Into<String>, value: Value) -> Result<&mut Self> {
        if let Some(text) = flatten(value)? {
            self.values.insert(key.into(), text);
        }
        Ok(self)
    }

    /// Flattens every top-level field of a serializable record into the container.
    ///
    /// The record must serialize to a JSON object; its keys become parameter names.
    pub fn extend_from<S: Serialize + ?Sized>(&mut self, record: &S) -> Result<&mut Self> {
        match serde_json::to_value(record).map_err(Error::Serialization)? {
            Value::Object(fields) => {
                for (key, value) in fields {
                    self.set_value(key, value)?;
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(Error::InvalidRequest(format!(
                "parameters must serialize to an object, got {other}"
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` rendering, empty when there are no values.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.values.iter())
            .finish()
    }
}

/// The text `value` would be stored as, `None` for `null`.
pub(crate) fn flattened(value: &Value) -> Option<String> {
    flatten(value.clone()).ok().flatten()
}

fn flatten(value: Value) -> Result<Option<String>> {
    Ok(match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        composite @ (Value::Array(_) | Value::Object(_)) => {
            Some(serde_json::to_string(&composite).map_err(Error::Serialization)?)
        }
    })
}
