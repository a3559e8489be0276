//! Model identifiers of the form `provider/model-name`

/// Provider reported for bare model names (no `/`). Requests for it go to the
/// OpenAI-compatible fallback (OpenRouter).
pub const UNKNOWN_PROVIDER: &str = "unknown";

/// API style classification for driver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiStyle {
    /// OpenAI chat completions format (also OpenRouter, Azure OpenAI, Ollama, LM Studio, ...)
    OpenAiCompatible,
    /// Anthropic messages format
    AnthropicMessages,
}

impl ApiStyle {
    /// Pick the wire format for a provider name taken from a model id.
    pub fn for_provider(provider: &str) -> Self {
        match provider {
            "anthropic" => ApiStyle::AnthropicMessages,
            _ => ApiStyle::OpenAiCompatible,
        }
    }
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAiCompatible => write!(f, "openai_compatible"),
            Self::AnthropicMessages => write!(f, "anthropic_messages"),
        }
    }
}

impl std::str::FromStr for ApiStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" | "openrouter" | "openai_compatible" => Ok(ApiStyle::OpenAiCompatible),
            "anthropic" | "anthropic_messages" => Ok(ApiStyle::AnthropicMessages),
            _ => Err(format!("Unknown API style: {}", s)),
        }
    }
}

/// A model id split on its first `/`.
///
/// `model` is the only place a config names its provider:
/// `"anthropic/claude-sonnet-4-5"` has provider `anthropic`, while a bare
/// `"gpt-4o"` has provider [`UNKNOWN_PROVIDER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId<'a> {
    raw: &'a str,
    provider: Option<&'a str>,
}

impl<'a> ModelId<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let provider = raw.split_once('/').map(|(provider, _)| provider);
        Self { raw, provider }
    }

    /// The id exactly as configured, prefix included.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn provider(&self) -> &'a str {
        self.provider.unwrap_or(UNKNOWN_PROVIDER)
    }

    /// Model name with every `/`-separated prefix removed; never contains `/`.
    pub fn name_without_prefix(&self) -> &'a str {
        self.raw.rsplit('/').next().unwrap_or(self.raw)
    }

    pub fn api_style(&self) -> ApiStyle {
        ApiStyle::for_provider(self.provider())
    }
}

impl std::fmt::Display for ModelId<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.raw)
    }
}
