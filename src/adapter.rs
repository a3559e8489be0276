//! Orchestration-framework adapter
//!
//! Maps a [`PromptConfig`] to a reusable single-brace chat prompt template and
//! a description of the chat client to construct, for frameworks that take
//! `{variable}` templates and a model plus keyword arguments.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::PromptConfig;
use crate::drivers::ANTHROPIC_DEFAULT_MAX_TOKENS;
use crate::payload::rules::NEUTRAL_SAMPLING_VALUE;
use crate::template::{convert_template, extract_variables};
use crate::types::message::MessageRole;
use crate::types::model::ModelId;

/// Endpoint used for providers without a dedicated client.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

const DEFAULT_TEMPERATURE: f64 = 1.0;

/// Provider name of a model id (`"unknown"` without a `/`).
pub fn get_provider(model: &str) -> String {
    ModelId::parse(model).provider().to_string()
}

/// Keyword arguments for a chat model constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelKwargs {
    pub temperature: f64,
    pub max_tokens: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl ModelKwargs {
    pub fn from_config(config: &PromptConfig) -> Self {
        Self {
            temperature: config.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: config
                .max_tokens
                .filter(|n| *n != 0)
                .unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS),
            top_p: config.top_p.filter(|p| *p != NEUTRAL_SAMPLING_VALUE),
            stop: (!config.stop_sequences.is_empty()).then(|| config.stop_sequences.clone()),
        }
    }
}

/// Chat prompt template in single-brace `{variable}` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChatPromptTemplate {
    pub messages: Vec<(MessageRole, String)>,
    /// Names the user template expects; the system prompt is passed through
    /// untouched and contributes none.
    pub input_variables: BTreeSet<String>,
}

impl ChatPromptTemplate {
    pub fn from_config(config: &PromptConfig) -> Self {
        let mut messages = Vec::new();
        if let Some(system) = config.system_prompt() {
            messages.push((MessageRole::System, system.to_string()));
        }
        let user = convert_template(config.user_prompt_template.as_deref());
        if !user.is_empty() {
            messages.push((MessageRole::User, user));
        }
        Self {
            messages,
            input_variables: extract_variables(config.user_prompt_template.as_deref()),
        }
    }
}

/// The chat client a framework should construct for a config.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "client", rename_all = "snake_case")]
pub enum ClientSpec {
    Anthropic {
        model: String,
        kwargs: ModelKwargs,
        #[serde(skip_serializing)]
        api_key: Option<String>,
    },
    #[serde(rename = "openai")]
    OpenAi {
        model: String,
        kwargs: ModelKwargs,
        #[serde(skip_serializing)]
        api_key: Option<String>,
    },
    /// Generic OpenAI-compatible endpoint; keeps the full model id for routing.
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible {
        model: String,
        base_url: String,
        kwargs: ModelKwargs,
        #[serde(skip_serializing)]
        api_key: Option<String>,
    },
}

impl ClientSpec {
    pub fn from_config(config: &PromptConfig, api_key: Option<String>) -> Self {
        let id = config.model_id();
        let kwargs = ModelKwargs::from_config(config);
        match id.provider() {
            "anthropic" => ClientSpec::Anthropic {
                model: id.name_without_prefix().to_string(),
                kwargs,
                api_key,
            },
            "openai" => ClientSpec::OpenAi {
                model: id.name_without_prefix().to_string(),
                kwargs,
                api_key,
            },
            _ => ClientSpec::OpenAiCompatible {
                model: id.as_str().to_string(),
                base_url: OPENROUTER_BASE_URL.to_string(),
                kwargs,
                api_key,
            },
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ClientSpec::Anthropic { model, .. }
            | ClientSpec::OpenAi { model, .. }
            | ClientSpec::OpenAiCompatible { model, .. } => model,
        }
    }

    pub fn kwargs(&self) -> &ModelKwargs {
        match self {
            ClientSpec::Anthropic { kwargs, .. }
            | ClientSpec::OpenAi { kwargs, .. }
            | ClientSpec::OpenAiCompatible { kwargs, .. } => kwargs,
        }
    }
}

/// Prompt template and client spec for `config`.
pub fn from_config(
    config: &PromptConfig,
    api_key: Option<String>,
) -> (ChatPromptTemplate, ClientSpec) {
    (
        ChatPromptTemplate::from_config(config),
        ClientSpec::from_config(config, api_key),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_provider() {
        assert_eq!(get_provider("anthropic/claude-sonnet-4-5"), "anthropic");
        assert_eq!(get_provider("google/gemini-pro"), "google");
        assert_eq!(get_provider("meta-llama/llama-3/70b"), "meta-llama");
        assert_eq!(get_provider("gpt-4o"), "unknown");
        assert_eq!(get_provider(""), "unknown");
    }

    #[test]
    fn test_model_kwargs_defaults() {
        let kwargs = ModelKwargs::from_config(&PromptConfig::default());
        assert_eq!(kwargs.temperature, 1.0);
        assert_eq!(kwargs.max_tokens, 4096);
        assert_eq!(
            serde_json::to_value(&kwargs).unwrap(),
            json!({"temperature": 1.0, "max_tokens": 4096})
        );
    }

    #[test]
    fn test_model_kwargs_from_config() {
        let config = PromptConfig::new("openai/gpt-4o")
            .with_temperature(0.7)
            .with_max_tokens(2048)
            .with_top_p(0.9)
            .with_stop_sequences(["END", "STOP"]);
        let kwargs = ModelKwargs::from_config(&config);
        assert_eq!(kwargs.temperature, 0.7);
        assert_eq!(kwargs.max_tokens, 2048);
        assert_eq!(kwargs.top_p, Some(0.9));
        assert_eq!(kwargs.stop, Some(vec!["END".to_string(), "STOP".to_string()]));

        let kwargs = ModelKwargs::from_config(&PromptConfig::new("m").with_top_p(1.0));
        assert_eq!(kwargs.top_p, None);
        assert_eq!(kwargs.stop, None);
    }

    #[test]
    fn test_prompt_template() {
        let config = PromptConfig::new("openai/gpt-4o")
            .with_system_prompt("Be brief.")
            .with_user_prompt_template("Summarize {{article_text}} in {{lang}}");
        let template = ChatPromptTemplate::from_config(&config);
        assert_eq!(
            template.messages,
            vec![
                (MessageRole::System, "Be brief.".to_string()),
                (MessageRole::User, "Summarize {article_text} in {lang}".to_string()),
            ]
        );
        assert_eq!(
            template.input_variables,
            BTreeSet::from(["article_text".to_string(), "lang".to_string()])
        );
    }

    #[test]
    fn test_empty_prompt_template() {
        let template = ChatPromptTemplate::from_config(&PromptConfig::new("m"));
        assert!(template.messages.is_empty());
        assert!(template.input_variables.is_empty());
    }

    #[test]
    fn test_client_selection() {
        let (_, client) = from_config(&PromptConfig::new("anthropic/claude-x"), Some("k".into()));
        assert!(matches!(client, ClientSpec::Anthropic { ref api_key, .. } if api_key.as_deref() == Some("k")));
        assert_eq!(client.model(), "claude-x");

        let client = ClientSpec::from_config(&PromptConfig::new("openai/gpt-4o"), None);
        assert!(matches!(client, ClientSpec::OpenAi { .. }));
        assert_eq!(client.model(), "gpt-4o");

        let client = ClientSpec::from_config(&PromptConfig::new("mistralai/mistral-large"), None);
        match &client {
            ClientSpec::OpenAiCompatible { model, base_url, .. } => {
                assert_eq!(model, "mistralai/mistral-large");
                assert_eq!(base_url, OPENROUTER_BASE_URL);
            }
            other => panic!("Expected OpenAiCompatible, got {:?}", other),
        }
        assert_eq!(client.kwargs().max_tokens, 4096);
    }

    #[test]
    fn test_client_spec_never_serializes_api_key() {
        let client = ClientSpec::from_config(&PromptConfig::new("openai/gpt-4o"), Some("sk".into()));
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["client"], "openai");
        assert!(value.get("api_key").is_none());
    }
}
