//! 模板解析 — `{{variable}}` 占位符的替换、提取与格式转换
//!
//! Template resolver for `{{identifier}}` placeholders.
//!
//! Identifiers match `\w+`. Resolution never fails: a placeholder without a
//! value is left in the output as literal `{{identifier}}` text so a caller
//! can surface or re-resolve it later.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is a valid regex")
});

/// Substitute `{{name}}` placeholders with values from `variables`.
///
/// Values are inserted verbatim; they are not escaped and not resolved again.
///
/// ```
/// use prompt_payload::template::resolve;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("a".to_string(), "1".to_string())]);
/// assert_eq!(resolve(Some("{{a}} {{b}}"), &vars), "1 {{b}}");
/// assert_eq!(resolve(None, &vars), "");
/// ```
pub fn resolve(template: Option<&str>, variables: &HashMap<String, String>) -> String {
    let template = match template {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct placeholder names referenced by `template`.
pub fn extract_variables(template: Option<&str>) -> BTreeSet<String> {
    match template {
        Some(t) => PLACEHOLDER
            .captures_iter(t)
            .map(|caps| caps[1].to_string())
            .collect(),
        None => BTreeSet::new(),
    }
}

/// Rewrite `{{name}}` as `{name}` for single-brace template engines.
///
/// No values are substituted.
pub fn convert_template(template: Option<&str>) -> String {
    match template {
        Some(t) if !t.is_empty() => PLACEHOLDER.replace_all(t, "{$1}").into_owned(),
        _ => String::new(),
    }
}

/// Overlay runtime `variables` on a config's sample inputs; runtime values win.
pub fn merge_variables(
    sample_inputs: &HashMap<String, String>,
    variables: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged = sample_inputs.clone();
    merged.extend(variables.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_replaces_variables() {
        assert_eq!(
            resolve(Some("Hello {{name}}!"), &vars(&[("name", "World")])),
            "Hello World!"
        );
        assert_eq!(
            resolve(
                Some("{{greeting}} {{name}}!"),
                &vars(&[("greeting", "Hi"), ("name", "Alice")])
            ),
            "Hi Alice!"
        );
    }

    #[test]
    fn test_leaves_unmatched_variables() {
        assert_eq!(resolve(Some("Hello {{name}}!"), &vars(&[])), "Hello {{name}}!");
        assert_eq!(
            resolve(Some("{{a}} {{b}} {{c}}"), &vars(&[("a", "1"), ("c", "3")])),
            "1 {{b}} 3"
        );
    }

    #[test]
    fn test_handles_missing_or_empty_template() {
        assert_eq!(resolve(None, &vars(&[("name", "World")])), "");
        assert_eq!(resolve(Some(""), &vars(&[("name", "World")])), "");
    }

    #[test]
    fn test_repeated_placeholder_resolves_every_occurrence() {
        assert_eq!(resolve(Some("{{x}}-{{x}}"), &vars(&[("x", "7")])), "7-7");
    }

    #[test]
    fn test_values_are_not_resolved_again() {
        assert_eq!(
            resolve(Some("{{a}}"), &vars(&[("a", "{{b}}"), ("b", "no")])),
            "{{b}}"
        );
        assert_eq!(resolve(Some("{{a}}"), &vars(&[("a", "$1 ${b}")])), "$1 ${b}");
    }

    #[test]
    fn test_non_word_placeholders_are_plain_text() {
        let v = vars(&[("first name", "x"), ("a", "1")]);
        assert_eq!(resolve(Some("{{first name}} {{ a }}"), &v), "{{first name}} {{ a }}");
    }

    #[test]
    fn test_extract_variables() {
        let names = extract_variables(Some("Hello {{name}}, your order {{orderId}} is ready"));
        assert_eq!(names, BTreeSet::from(["name".to_string(), "orderId".to_string()]));

        let names = extract_variables(Some("{{a}} {{a}} {{b}}"));
        assert_eq!(names.len(), 2);
        assert!(names.contains("a") && names.contains("b"));

        assert!(extract_variables(Some("Hello world")).is_empty());
        assert!(extract_variables(Some("")).is_empty());
        assert!(extract_variables(None).is_empty());
    }

    #[test]
    fn test_convert_template() {
        assert_eq!(convert_template(Some("Hi {{name}}!")), "Hi {name}!");
        assert_eq!(convert_template(Some("{{greeting}} {{name}}")), "{greeting} {name}");
        assert_eq!(convert_template(Some("Hello world")), "Hello world");
        assert_eq!(convert_template(Some("")), "");
        assert_eq!(convert_template(None), "");
    }

    #[test]
    fn test_merge_prefers_runtime_values() {
        let merged = merge_variables(
            &vars(&[("text", "sample"), ("lang", "en")]),
            &vars(&[("text", "override")]),
        );
        assert_eq!(merged["text"], "override");
        assert_eq!(merged["lang"], "en");
    }
}
