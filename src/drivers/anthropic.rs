//! Anthropic Messages API 驱动 — 实现 Anthropic 特有的请求体格式转换
//!
//! Anthropic Messages API driver. Handles the key differences from OpenAI:
//! - The system prompt is a top-level `system` parameter, not part of `messages`.
//! - `model` carries no provider prefix.
//! - `max_tokens` is required, not optional.
//! - Stop sequences go in `stop_sequences`.
//! - Tools use `{name, description, input_schema}` and `tool_choice` is an object.

use serde_json::{json, Value};
use std::collections::HashMap;

use crate::config::{PromptConfig, ToolChoice};
use crate::payload::rules::{non_empty, present, truthy_i64, unless_sentinel};
use crate::payload::{FieldRule, Payload};
use crate::types::message::Message;
use crate::types::model::ApiStyle;
use crate::types::tool::{AnthropicTool, ToolDefinition};

use super::{resolve_user_prompt, PayloadDriver};

/// `max_tokens` sent when the config leaves it unset or zero.
pub const ANTHROPIC_DEFAULT_MAX_TOKENS: i64 = 4096;

/// Fields emitted after `model` and `messages`, in order. `max_tokens` is the
/// only one that is never omitted.
pub const ANTHROPIC_FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        key: "max_tokens",
        extract: |c| {
            Some(Value::from(
                c.max_tokens
                    .filter(|n| *n != 0)
                    .unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS),
            ))
        },
    },
    FieldRule {
        key: "system",
        extract: |c| c.system_prompt().map(Value::from),
    },
    FieldRule {
        key: "temperature",
        extract: |c| present(c.temperature),
    },
    FieldRule {
        key: "top_p",
        extract: |c| unless_sentinel(c.top_p),
    },
    FieldRule {
        key: "top_k",
        extract: |c| truthy_i64(c.top_k),
    },
    FieldRule {
        key: "stop_sequences",
        extract: |c| non_empty(&c.stop_sequences),
    },
];

/// Anthropic Messages API driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicDriver;

impl AnthropicDriver {
    pub fn new() -> Self {
        Self
    }

    /// Translate OpenAI-style function tools. Entries of any other shape are
    /// dropped.
    pub fn translate_tools(tools: &[Value]) -> Vec<AnthropicTool> {
        tools
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| match ToolDefinition::from_value(raw) {
                Some(tool) => Some(AnthropicTool::from(tool)),
                None => {
                    tracing::debug!("Dropping tools[{}]: not a function tool", index);
                    None
                }
            })
            .collect()
    }

    /// `auto` is the API default and is left out.
    fn tool_choice(choice: ToolChoice) -> Option<Value> {
        match choice {
            ToolChoice::Auto => None,
            ToolChoice::Required => Some(json!({ "type": "any" })),
            ToolChoice::None => Some(json!({ "type": "none" })),
        }
    }
}

impl PayloadDriver for AnthropicDriver {
    fn api_style(&self) -> ApiStyle {
        ApiStyle::AnthropicMessages
    }

    fn build_payload(
        &self,
        config: &PromptConfig,
        variables: &HashMap<String, String>,
    ) -> Payload {
        tracing::debug!("Building {} payload for model '{}'", self.api_style(), config.model);

        let mut messages: Vec<Value> = Vec::with_capacity(1);
        let user_content = resolve_user_prompt(config, variables);
        if !user_content.is_empty() {
            messages.push(Message::user(user_content).to_value());
        }

        let mut payload = Payload::new();
        payload.insert("model", config.model_id().name_without_prefix());
        payload.insert("messages", Value::Array(messages));
        payload.apply_rules(config, ANTHROPIC_FIELD_RULES);

        let tools = Self::translate_tools(&config.tools);
        if !tools.is_empty() {
            let tools = tools.iter().map(AnthropicTool::to_value).collect();
            payload.insert("tools", Value::Array(tools));
            if let Some(choice) = Self::tool_choice(config.tool_choice) {
                payload.insert("tool_choice", choice);
            }
        }

        payload
    }
}

/// Build an Anthropic Messages API body.
///
/// ```
/// use prompt_payload::{build_anthropic_payload, PromptConfig};
/// use std::collections::HashMap;
///
/// let config = PromptConfig::new("anthropic/claude-x").with_system_prompt("S");
/// let payload = build_anthropic_payload(&config, &HashMap::new());
/// assert_eq!(payload["model"], "claude-x");
/// assert_eq!(payload["system"], "S");
/// assert_eq!(payload["max_tokens"], 4096);
/// ```
pub fn build_anthropic_payload(
    config: &PromptConfig,
    variables: &HashMap<String, String>,
) -> Payload {
    AnthropicDriver.build_payload(config, variables)
}
