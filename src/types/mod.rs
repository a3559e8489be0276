//! 类型系统模块：提示配置到请求体映射所用的核心数据类型。
//!
//! # Types Module
//!
//! Strongly-typed building blocks shared by the template resolver, the payload
//! drivers and the framework adapter.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and text content |
//! | [`MessageRole`] | Message role (system, user) |
//! | [`ModelId`] | `provider/model-name` identifier split into its parts |
//! | [`ApiStyle`] | Wire format a provider speaks |
//! | [`ToolDefinition`] | OpenAI-style function tool descriptor |
//! | [`AnthropicTool`] | Anthropic `tools[]` entry |
//!
//! ## Example
//!
//! ```rust
//! use prompt_payload::types::{ApiStyle, Message, ModelId};
//!
//! let id = ModelId::parse("anthropic/claude-sonnet-4-5");
//! assert_eq!(id.provider(), "anthropic");
//! assert_eq!(id.api_style(), ApiStyle::AnthropicMessages);
//!
//! let system = Message::system("You are a helpful assistant");
//! assert_eq!(system.content, "You are a helpful assistant");
//! ```

pub mod message;
pub mod model;
pub mod tool;

pub use message::{Message, MessageRole};
pub use model::{ApiStyle, ModelId, UNKNOWN_PROVIDER};
pub use tool::{AnthropicTool, FunctionDefinition, ToolDefinition};
