//! Render context passed to views and engines.
//!
//! A [`Context`] is an explicit key-value map: templates see each entry as a
//! named variable. Keeping the context a structured lookup (instead of
//! injecting ambient fields onto the view object) makes the data flowing
//! into a render call inspectable and testable.
//!
//! # Example
//!
//! ```rust
//! use lookout::Context;
//! use serde_json::json;
//!
//! let context = Context::new()
//!     .with("title", "Monthly report")
//!     .with("entries", json!(["a", "b", "c"]));
//!
//! assert_eq!(context.get("title"), Some(&json!("Monthly report")));
//! assert_eq!(context.len(), 2);
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

/// Key-value context for a render call.
///
/// Values are [`serde_json::Value`]s, so anything serializable can be
/// carried. Entries keep their insertion order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from any serializable value.
    ///
    /// The value must serialize to a JSON object; each top-level field
    /// becomes a context entry.
    pub fn from_serialize<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(data)?;
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(serde::ser::Error::custom(format!(
                "context data must serialize to an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Adds an entry, consuming and returning the context for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds an entry in place. An existing entry under the same key is
    /// replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the context has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
