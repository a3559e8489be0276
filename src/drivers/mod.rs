//! Payload 驱动抽象层 — 通过 trait 实现多厂商请求体格式的动态分发
//!
//! Payload driver abstraction layer. Each API style (OpenAI-compatible,
//! Anthropic Messages) has a concrete driver that turns a [`PromptConfig`]
//! plus runtime variables into a provider-shaped [`Payload`]. Drivers are
//! pure: they never fail and never touch the network.

pub mod anthropic;

use serde_json::{json, Value};
use std::collections::HashMap;

use crate::config::{PromptConfig, ResponseFormat, ToolChoice};
use crate::payload::rules::{
    non_empty, present, truthy_f64, truthy_i64, truthy_unless_sentinel, unless_sentinel,
};
use crate::payload::{FieldRule, Payload};
use crate::template::{merge_variables, resolve};
use crate::types::message::Message;
use crate::types::model::{ApiStyle, ModelId};

pub use anthropic::{build_anthropic_payload, AnthropicDriver, ANTHROPIC_DEFAULT_MAX_TOKENS};

/// Core trait for provider-specific request body construction.
///
/// The trait is object-safe and supports dynamic dispatch via
/// `Box<dyn PayloadDriver>`; [`create_driver`] picks the implementation for an
/// [`ApiStyle`].
pub trait PayloadDriver: Send + Sync + std::fmt::Debug {
    /// API style this driver implements.
    fn api_style(&self) -> ApiStyle;

    /// Build the request body for `config`, resolving its user prompt template
    /// against `variables` layered over the config's sample inputs.
    fn build_payload(&self, config: &PromptConfig, variables: &HashMap<String, String>)
        -> Payload;
}

/// Resolve the user prompt template with runtime variables taking precedence
/// over sample inputs. Empty when there is no template.
pub(crate) fn resolve_user_prompt(
    config: &PromptConfig,
    variables: &HashMap<String, String>,
) -> String {
    let merged = merge_variables(&config.sample_inputs, variables);
    resolve(config.user_prompt_template.as_deref(), &merged)
}

/// Sampling and output-control fields of the OpenAI chat completions body,
/// in emission order.
pub const OPENAI_FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        key: "temperature",
        extract: |c| present(c.temperature),
    },
    FieldRule {
        key: "max_tokens",
        extract: |c| truthy_i64(c.max_tokens),
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
        key: "frequency_penalty",
        extract: |c| truthy_f64(c.frequency_penalty),
    },
    FieldRule {
        key: "presence_penalty",
        extract: |c| truthy_f64(c.presence_penalty),
    },
    FieldRule {
        key: "repetition_penalty",
        extract: |c| truthy_unless_sentinel(c.repetition_penalty),
    },
    FieldRule {
        key: "min_p",
        extract: |c| truthy_f64(c.min_p),
    },
    FieldRule {
        key: "stop",
        extract: |c| non_empty(&c.stop_sequences),
    },
    FieldRule {
        key: "response_format",
        extract: openai_response_format,
    },
    FieldRule {
        key: "tools",
        extract: |c| (!c.tools.is_empty()).then(|| Value::Array(c.tools.clone())),
    },
    FieldRule {
        key: "tool_choice",
        extract: openai_tool_choice,
    },
    FieldRule {
        key: "reasoning",
        extract: |c| {
            c.reasoning
                .then(|| json!({ "effort": c.reasoning_effort.as_str() }))
        },
    },
];

fn openai_response_format(config: &PromptConfig) -> Option<Value> {
    match config.response_format {
        ResponseFormat::Text => None,
        ResponseFormat::JsonObject => Some(json!({ "type": "json_object" })),
        ResponseFormat::JsonSchema => config
            .json_schema
            .as_ref()
            .filter(|schema| !is_empty_schema(schema))
            .map(|schema| json!({ "type": "json_schema", "json_schema": schema })),
    }
}

/// `null`, `false`, `0` and empty strings, arrays or objects carry no schema.
fn is_empty_schema(schema: &Value) -> bool {
    match schema {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Plain string, only alongside tools and only when not `auto`.
fn openai_tool_choice(config: &PromptConfig) -> Option<Value> {
    if config.tools.is_empty() {
        return None;
    }
    match config.tool_choice {
        ToolChoice::Auto => None,
        choice @ (ToolChoice::Required | ToolChoice::None) => Some(Value::from(choice.as_str())),
    }
}

/// OpenAI chat completions driver — also covers OpenRouter, Azure OpenAI,
/// Ollama, LM Studio and any other OpenAI-compatible endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiDriver;

impl OpenAiDriver {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadDriver for OpenAiDriver {
    fn api_style(&self) -> ApiStyle {
        ApiStyle::OpenAiCompatible
    }

    fn build_payload(
        &self,
        config: &PromptConfig,
        variables: &HashMap<String, String>,
    ) -> Payload {
        tracing::debug!("Building {} payload for model '{}'", self.api_style(), config.model);

        let mut messages: Vec<Value> = Vec::with_capacity(2);
        if let Some(system) = config.system_prompt() {
            messages.push(Message::system(system).to_value());
        }
        let user_content = resolve_user_prompt(config, variables);
        if !user_content.is_empty() {
            messages.push(Message::user(user_content).to_value());
        }

        let mut payload = Payload::new();
        // The provider prefix stays: OpenRouter routes on it.
        payload.insert("model", config.model.clone());
        payload.insert("messages", Value::Array(messages));
        payload.apply_rules(config, OPENAI_FIELD_RULES);
        payload
    }
}

/// Factory function to create the driver for an API style.
pub fn create_driver(api_style: ApiStyle) -> Box<dyn PayloadDriver> {
    match api_style {
        ApiStyle::OpenAiCompatible => Box::new(OpenAiDriver::new()),
        ApiStyle::AnthropicMessages => Box::new(AnthropicDriver::new()),
    }
}

/// Driver for the provider named by a `provider/model-name` id. Bare names and
/// unrecognised providers get the OpenAI-compatible driver.
pub fn driver_for_model(model: &str) -> Box<dyn PayloadDriver> {
    create_driver(ModelId::parse(model).api_style())
}

/// Build an OpenAI-compatible chat completions body.
///
/// ```
/// use prompt_payload::{build_openai_payload, PromptConfig};
/// use std::collections::HashMap;
///
/// let config = PromptConfig::new("openai/gpt-4o")
///     .with_system_prompt("S")
///     .with_user_prompt_template("Hi {{n}}");
/// let vars = HashMap::from([("n".to_string(), "Bob".to_string())]);
///
/// let payload = build_openai_payload(&config, &vars);
/// assert_eq!(payload["model"], "openai/gpt-4o");
/// assert_eq!(payload["messages"][1]["content"], "Hi Bob");
/// ```
pub fn build_openai_payload(config: &PromptConfig, variables: &HashMap<String, String>) -> Payload {
    OpenAiDriver.build_payload(config, variables)
}

/// OpenRouter speaks the OpenAI format.
pub use self::build_openai_payload as build_openrouter_payload;

/// Build the body for whichever API the config's model id points at.
pub fn build_payload_for_model(
    config: &PromptConfig,
    variables: &HashMap<String, String>,
) -> Payload {
    driver_for_model(&config.model).build_payload(config, variables)
}
