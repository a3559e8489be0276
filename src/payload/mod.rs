//! Provider request body accumulator
//!
//! A [`Payload`] is an insertion-ordered JSON object. Drivers start it with
//! the base fields and then apply [`FieldRule`] tables, each rule adding its
//! key only when its guard holds.

pub mod rules;

pub use rules::FieldRule;

use serde::Serialize;
use serde_json::{Map, Value};
use std::ops::Index;

use crate::config::PromptConfig;

static NULL: Value = Value::Null;

/// A ready-to-send request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload {
    body: Map<String, Value>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.body.insert(key.into(), value.into());
    }

    /// Apply `rules` in table order.
    pub fn apply_rules(&mut self, config: &PromptConfig, rules: &[FieldRule]) {
        for rule in rules {
            if let Some(value) = rule.evaluate(config) {
                self.body.insert(rule.key.to_string(), value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.body.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.body.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }

    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.body)?)
    }

    pub fn to_json_string_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.body)?)
    }
}

/// Missing keys index to `null`, like [`serde_json::Value`].
impl Index<&str> for Payload {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.body.get(key).unwrap_or(&NULL)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_value()
    }
}
