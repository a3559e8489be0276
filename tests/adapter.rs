//! Framework adapter over real config files

use prompt_payload::adapter::{from_config, ClientSpec, OPENROUTER_BASE_URL};
use prompt_payload::{MessageRole, PromptConfig};
use std::collections::BTreeSet;

#[test]
fn test_yaml_config_to_template_and_client() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/summarize.yaml");
    let config = PromptConfig::from_path(path).unwrap();

    let (template, client) = from_config(&config, Some("sk-ant".to_string()));

    assert_eq!(template.messages.len(), 2);
    assert_eq!(template.messages[0].0, MessageRole::System);
    assert_eq!(
        template.messages[1].1,
        "Summarize the following article in {language}:\n\n{article_text}"
    );
    assert_eq!(
        template.input_variables,
        BTreeSet::from(["article_text".to_string(), "language".to_string()])
    );

    match client {
        ClientSpec::Anthropic {
            model,
            kwargs,
            api_key,
        } => {
            assert_eq!(model, "claude-sonnet-4-5");
            assert_eq!(kwargs.temperature, 0.3);
            assert_eq!(kwargs.max_tokens, 4096);
            assert_eq!(kwargs.top_p, Some(0.9));
            assert_eq!(kwargs.stop, Some(vec!["</summary>".to_string()]));
            assert_eq!(api_key.as_deref(), Some("sk-ant"));
        }
        other => panic!("Expected Anthropic client, got {:?}", other),
    }
}

#[test]
fn test_bare_model_uses_openrouter_endpoint() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/chat.json");
    let config = PromptConfig::from_path(path).unwrap();

    let (template, client) = from_config(&config, None);
    assert_eq!(template.messages, vec![(MessageRole::User, "{question}".to_string())]);

    match client {
        ClientSpec::OpenAiCompatible {
            model,
            base_url,
            kwargs,
            ..
        } => {
            assert_eq!(model, "gpt-4o-mini");
            assert_eq!(base_url, OPENROUTER_BASE_URL);
            assert_eq!(kwargs.temperature, 1.0);
            assert_eq!(kwargs.max_tokens, 256);
            assert_eq!(kwargs.top_p, None);
        }
        other => panic!("Expected OpenAI-compatible client, got {:?}", other),
    }
}
