//! Enumerated config options with lenient string parsing

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Requested response format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonObject,
    JsonSchema,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
            ResponseFormat::JsonObject => "json_object",
            ResponseFormat::JsonSchema => "json_schema",
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "" => Ok(ResponseFormat::Text),
            "json_object" => Ok(ResponseFormat::JsonObject),
            "json_schema" => Ok(ResponseFormat::JsonSchema),
            _ => Err(format!("Unknown response format: {}", s)),
        }
    }
}

/// How the model may use the configured tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    #[default]
    Auto,
    Required,
    None,
}

impl ToolChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolChoice::Auto => "auto",
            ToolChoice::Required => "required",
            ToolChoice::None => "none",
        }
    }
}

impl FromStr for ToolChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" | "" => Ok(ToolChoice::Auto),
            "required" => Ok(ToolChoice::Required),
            "none" => Ok(ToolChoice::None),
            _ => Err(format!("Unknown tool choice: {}", s)),
        }
    }
}

/// Reasoning effort sent with the OpenRouter `reasoning` extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl FromStr for ReasoningEffort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ReasoningEffort::Low),
            "medium" | "" => Ok(ReasoningEffort::Medium),
            "high" => Ok(ReasoningEffort::High),
            _ => Err(format!("Unknown reasoning effort: {}", s)),
        }
    }
}

macro_rules! lenient_deserialize {
    ($($ty:ty),* $(,)?) => {$(
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                Ok(lenient_option(Option::<Value>::deserialize(deserializer)?))
            }
        }
    )*};
}

lenient_deserialize!(ResponseFormat, ToolChoice, ReasoningEffort);

/// Parse an optional raw value, falling back to the default for `null`,
/// non-strings and unrecognised strings.
fn lenient_option<T>(raw: Option<Value>) -> T
where
    T: FromStr<Err = String> + Default,
{
    match raw {
        None | Some(Value::Null) => T::default(),
        Some(Value::String(s)) => s.parse::<T>().unwrap_or_else(|e| {
            tracing::warn!("{}; using default", e);
            T::default()
        }),
        Some(other) => {
            tracing::warn!("Expected a string option, got {}; using default", other);
            T::default()
        }
    }
}

/// Treat an explicit `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read an integer count leniently: negative values and integral floats such
/// as `1024.0` are kept, anything else is dropped with a warning.
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(i),
            None => integral_f64(n.as_f64()).or_else(|| {
                tracing::warn!("Integer option {} is out of range or fractional; ignoring", n);
                None
            }),
        },
        Some(other) => {
            tracing::warn!("Expected an integer option, got {}; ignoring", other);
            None
        }
    })
}

fn integral_f64(value: Option<f64>) -> Option<i64> {
    value
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}
