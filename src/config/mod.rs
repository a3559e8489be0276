//! Prompt configuration record
//!
//! [`PromptConfig`] is the provider-agnostic input to every payload driver.
//! Field names follow the camelCase JSON emitted by config authoring tools;
//! unknown fields are ignored and `null` means "absent".

pub mod loader;
pub mod options;

pub use options::{ReasoningEffort, ResponseFormat, ToolChoice};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::types::model::ModelId;
use crate::types::tool::ToolDefinition;
use options::{lenient_int, null_as_default};

/// Provider-agnostic prompt configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    /// `"<provider>/<model-name>"` or a bare model name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// User message template with `{{identifier}}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt_template: Option<String>,
    /// Fallback placeholder values; runtime variables override them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample_inputs: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_tokens: Option<i64>,
    /// 1.0 means "unset".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub top_k: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    /// 1.0 means "unset".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_p: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stop_sequences: Vec<String>,

    #[serde(default)]
    pub response_format: ResponseFormat,
    /// Only meaningful with [`ResponseFormat::JsonSchema`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<Value>,

    /// Raw OpenAI-style tool descriptors, kept verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<Value>,
    #[serde(default)]
    pub tool_choice: ToolChoice,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reasoning: bool,
    #[serde(default)]
    pub reasoning_effort: ReasoningEffort,
}

impl PromptConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn model_id(&self) -> ModelId<'_> {
        ModelId::parse(&self.model)
    }

    /// System prompt, if set and non-empty.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref().filter(|s| !s.is_empty())
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_user_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.user_prompt_template = Some(template.into());
        self
    }

    pub fn with_sample_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.sample_inputs.insert(name.into(), value.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_top_k(mut self, top_k: i64) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_repetition_penalty(mut self, penalty: f64) -> Self {
        self.repetition_penalty = Some(penalty);
        self
    }

    pub fn with_min_p(mut self, min_p: f64) -> Self {
        self.min_p = Some(min_p);
        self
    }

    pub fn with_stop_sequences<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_sequences = stops.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Request schema-constrained JSON output.
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.response_format = ResponseFormat::JsonSchema;
        self.json_schema = Some(schema);
        self
    }

    pub fn with_tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.push(tool.to_value());
        self
    }

    /// Append a tool entry as-is, whatever its shape.
    pub fn with_raw_tool(mut self, tool: Value) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = choice;
        self
    }

    pub fn with_reasoning(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning = true;
        self.reasoning_effort = effort;
        self
    }
}
