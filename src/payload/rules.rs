//! Conditional field inclusion
//!
//! A [`FieldRule`] pairs an output key with an extractor whose `None` result
//! means "omit the key". The guard helpers below cover every inclusion test
//! the drivers use; "truthy" means non-null and non-zero, so an explicit zero
//! is omitted exactly like an unset value.

use serde_json::Value;

use crate::config::PromptConfig;

/// Extracts a field's output value, or `None` when its guard fails.
pub type Extract = fn(&PromptConfig) -> Option<Value>;

/// One `(guard, key, transform)` entry of a driver's rule table.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub extract: Extract,
}

impl FieldRule {
    pub fn evaluate(&self, config: &PromptConfig) -> Option<Value> {
        (self.extract)(config)
    }
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule").field("key", &self.key).finish()
    }
}

/// Sentinel for `topP` and `repetitionPenalty` meaning "leave at provider default".
pub const NEUTRAL_SAMPLING_VALUE: f64 = 1.0;

/// Not null.
pub fn present(value: Option<f64>) -> Option<Value> {
    value.map(Value::from)
}

/// Non-null and non-zero.
pub fn truthy_i64(value: Option<i64>) -> Option<Value> {
    value.filter(|v| *v != 0).map(Value::from)
}

/// Non-null and non-zero.
pub fn truthy_f64(value: Option<f64>) -> Option<Value> {
    value.filter(|v| *v != 0.0).map(Value::from)
}

/// Not null and not the neutral `1.0`.
pub fn unless_sentinel(value: Option<f64>) -> Option<Value> {
    value
        .filter(|v| *v != NEUTRAL_SAMPLING_VALUE)
        .map(Value::from)
}

/// Truthy and not the neutral `1.0`.
pub fn truthy_unless_sentinel(value: Option<f64>) -> Option<Value> {
    value
        .filter(|v| *v != 0.0 && *v != NEUTRAL_SAMPLING_VALUE)
        .map(Value::from)
}

pub fn non_empty(values: &[String]) -> Option<Value> {
    if values.is_empty() {
        None
    } else {
        Some(Value::from(values.to_vec()))
    }
}
