//! # prompt-payload
//!
//! 将与厂商无关的提示配置转换为可直接发送的 LLM API 请求体。
//!
//! Turns a provider-agnostic prompt configuration into ready-to-send request
//! bodies for OpenAI-compatible APIs (OpenAI, OpenRouter, Azure OpenAI,
//! Ollama, ...) and the Anthropic Messages API.
//!
//! ## Overview
//!
//! `config + runtime variables → template resolver → payload driver → request body`
//!
//! Everything here is synchronous and pure: no network, no shared state. The
//! returned [`Payload`] is handed to whatever HTTP client the caller uses.
//!
//! - **Template resolution**: `{{name}}` placeholders filled from runtime
//!   variables, then from the config's sample inputs; unknown names are left
//!   as-is.
//! - **Payload drivers**: one [`PayloadDriver`] per API style, each applying an
//!   ordered table of conditional field rules.
//! - **Framework adapter**: single-brace prompt templates and client specs for
//!   orchestration frameworks, via [`adapter`].
//!
//! ## Quick Start
//!
//! ```rust
//! use prompt_payload::{build_anthropic_payload, build_openai_payload, PromptConfig};
//! use std::collections::HashMap;
//!
//! let config = PromptConfig::new("anthropic/claude-sonnet-4-5")
//!     .with_system_prompt("You summarize articles.")
//!     .with_user_prompt_template("Summarize: {{article_text}}")
//!     .with_temperature(0.3);
//!
//! let vars = HashMap::from([("article_text".to_string(), "...".to_string())]);
//!
//! let anthropic = build_anthropic_payload(&config, &vars);
//! assert_eq!(anthropic["model"], "claude-sonnet-4-5");
//! assert_eq!(anthropic["system"], "You summarize articles.");
//!
//! let openai = build_openai_payload(&config, &vars);
//! assert_eq!(openai["messages"][0]["role"], "system");
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | `PromptConfig` record, option enums and JSON/YAML loading |
//! | [`template`] | Placeholder resolution, extraction and conversion |
//! | [`payload`] | Request body accumulator and field-rule guards |
//! | [`drivers`] | OpenAI-compatible and Anthropic payload drivers |
//! | [`adapter`] | Orchestration-framework prompt template and client spec |
//! | [`types`] | Messages, model ids and tool definitions |

pub mod adapter;
pub mod config;
pub mod drivers;
pub mod payload;
pub mod template;
pub mod types;

// Re-export main types for convenience
pub use config::{PromptConfig, ReasoningEffort, ResponseFormat, ToolChoice};
pub use drivers::{
    build_anthropic_payload, build_openai_payload, build_openrouter_payload,
    build_payload_for_model, create_driver, driver_for_model, AnthropicDriver, OpenAiDriver,
    PayloadDriver,
};
pub use payload::Payload;
pub use template::{convert_template, extract_variables, resolve};
pub use types::{ApiStyle, Message, MessageRole, ModelId};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
