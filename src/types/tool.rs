//! Tool calling definitions in OpenAI and Anthropic shapes

use serde::Serialize;
use serde_json::Value;

/// Tool definition (for function calling), OpenAI shape:
/// `{"type": "function", "function": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Option<Value>, // JSON Schema
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters: Some(parameters),
            },
        }
    }

    /// Read a raw tool entry leniently.
    ///
    /// Returns `None` unless `type` is `"function"` and `function` is a
    /// non-empty object carrying a string `name`. Extra keys are ignored and a
    /// `null` description or parameters counts as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("type").and_then(Value::as_str) != Some("function") {
            return None;
        }
        let function = value.get("function")?.as_object()?;
        if function.is_empty() {
            return None;
        }
        let name = function.get("name")?.as_str()?.to_string();
        let description = function
            .get("description")
            .and_then(Value::as_str)
            .map(String::from);
        let parameters = function.get("parameters").filter(|p| !p.is_null()).cloned();

        Some(Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name,
                description,
                parameters,
            },
        })
    }

    /// Serialize back to the raw OpenAI-style JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Anthropic `tools[]` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnthropicTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl AnthropicTool {
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.input_schema,
        })
    }
}

impl From<ToolDefinition> for AnthropicTool {
    fn from(tool: ToolDefinition) -> Self {
        let FunctionDefinition {
            name,
            description,
            parameters,
        } = tool.function;
        Self {
            name,
            description: description.unwrap_or_default(),
            input_schema: parameters.unwrap_or_else(|| Value::Object(Default::default())),
        }
    }
}
