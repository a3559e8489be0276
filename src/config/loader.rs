//! Config loading from JSON and YAML text or files

use std::path::Path;

use super::PromptConfig;
use crate::error::{Error, ErrorContext};

impl PromptConfig {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_yaml_str(text: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a config file, choosing the format from its extension
    /// (`.json`, `.yaml` or `.yml`).
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        let text = std::fs::read_to_string(path)?;
        tracing::debug!("Loading prompt config from {}", path.display());

        match ext.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            other => Err(Error::configuration_with_context(
                "Unsupported config file extension",
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_details(format!("got '{}', expected json, yaml or yml", other))
                    .with_source("config_loader"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResponseFormat, ToolChoice};

    const YAML_CONFIG: &str = r#"
id: summarize
model: anthropic/claude-sonnet-4-5
systemPrompt: You are concise.
userPromptTemplate: "Summarize: {{article_text}}"
maxTokens: 1024
topP: 0.9
stopSequences: [END]
responseFormat: json_object
toolChoice: required
tools:
  - type: function
    function:
      name: lookup
      description: Look something up
      parameters:
        type: object
sampleInputs:
  article_text: The quick brown fox.
"#;

    #[test]
    fn test_from_yaml_str() {
        let config = PromptConfig::from_yaml_str(YAML_CONFIG).unwrap();
        assert_eq!(config.model, "anthropic/claude-sonnet-4-5");
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.top_p, Some(0.9));
        assert_eq!(config.response_format, ResponseFormat::JsonObject);
        assert_eq!(config.tool_choice, ToolChoice::Required);
        assert_eq!(config.tools.len(), 1);
        assert_eq!(config.tools[0]["function"]["name"], "lookup");
        assert_eq!(config.sample_inputs["article_text"], "The quick brown fox.");
    }

    #[test]
    fn test_from_json_str_rejects_malformed_text() {
        let err = PromptConfig::from_json_str("{\"model\": ").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = std::env::temp_dir();
        let yaml_path = dir.join("prompt_payload_loader_test.yaml");
        std::fs::write(&yaml_path, YAML_CONFIG).unwrap();
        let config = PromptConfig::from_path(&yaml_path).unwrap();
        let _ = std::fs::remove_file(&yaml_path);
        assert_eq!(config.stop_sequences, vec!["END".to_string()]);

        let json_path = dir.join("prompt_payload_loader_test.json");
        std::fs::write(&json_path, r#"{"model": "openai/gpt-4o", "temperature": 0.2}"#).unwrap();
        let config = PromptConfig::from_path(&json_path).unwrap();
        let _ = std::fs::remove_file(&json_path);
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_from_path_unsupported_extension() {
        let path = std::env::temp_dir().join("prompt_payload_loader_test.toml");
        std::fs::write(&path, "model = 'x'").unwrap();
        let err = PromptConfig::from_path(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        match err {
            Error::Configuration { context, .. } => {
                assert_eq!(context.source.as_deref(), Some("config_loader"));
            }
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = PromptConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
