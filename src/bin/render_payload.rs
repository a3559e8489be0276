//! render-payload — 将提示配置文件渲染为 provider 请求体
//!
//! Usage:
//!   render-payload <config.{json,yaml,yml}> [--style openai|anthropic|auto] [--var name=value]...
//!   render-payload <config> --variables      List the placeholders the template needs

use std::collections::HashMap;

use anyhow::{bail, Context};
use prompt_payload::{
    create_driver, driver_for_model, extract_variables, ApiStyle, Error, ErrorContext,
    PromptConfig,
};
use tracing_subscriber::EnvFilter;

struct Args {
    config_path: String,
    style: Option<ApiStyle>,
    variables: HashMap<String, String>,
    list_variables: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        std::process::exit(if args.is_empty() { 1 } else { 0 });
    }

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"render-payload — render a prompt config as a provider request body

USAGE:
    render-payload <CONFIG> [OPTIONS]

ARGS:
    <CONFIG>                    Prompt config file (.json, .yaml or .yml)

OPTIONS:
    --style <STYLE>             openai | anthropic | auto (default: auto, from the model prefix)
    --var <NAME=VALUE>          Template variable; repeatable, overrides sampleInputs
    --variables                 Print the template's placeholder names instead
    -h, --help                  Show this help message

ENVIRONMENT:
    RUST_LOG                    Log filter, e.g. RUST_LOG=prompt_payload=debug"#
    );
}

fn run(raw: &[String]) -> anyhow::Result<()> {
    let args = parse_args(raw)?;
    let config = PromptConfig::from_path(&args.config_path)
        .with_context(|| format!("failed to load {}", args.config_path))?;

    if args.list_variables {
        for name in extract_variables(config.user_prompt_template.as_deref()) {
            println!("{}", name);
        }
        return Ok(());
    }

    let driver = match args.style {
        Some(style) => create_driver(style),
        None => driver_for_model(&config.model),
    };
    tracing::debug!("Using {} driver", driver.api_style());

    let payload = driver.build_payload(&config, &args.variables);
    println!("{}", payload.to_json_string_pretty()?);
    Ok(())
}

fn parse_args(raw: &[String]) -> anyhow::Result<Args> {
    let mut config_path = None;
    let mut style = None;
    let mut variables = HashMap::new();
    let mut list_variables = false;

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--style" => {
                let value = iter.next().context("--style needs a value")?;
                style = match value.as_str() {
                    "auto" => None,
                    other => Some(other.parse::<ApiStyle>().map_err(anyhow::Error::msg)?),
                };
            }
            "--var" => {
                let value = iter.next().context("--var needs NAME=VALUE")?;
                let (name, val) = parse_var(value)?;
                variables.insert(name, val);
            }
            "--variables" => list_variables = true,
            other if other.starts_with("--") => bail!("unknown option: {}", other),
            other => {
                if config_path.replace(other.to_string()).is_some() {
                    bail!("only one config file may be given");
                }
            }
        }
    }

    Ok(Args {
        config_path: config_path.context("missing <CONFIG> argument")?,
        style,
        variables,
        list_variables,
    })
}

fn parse_var(raw: &str) -> prompt_payload::Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(Error::validation_with_context(
            "Template variable must look like NAME=VALUE",
            ErrorContext::new()
                .with_field_path("--var")
                .with_details(raw.to_string())
                .with_source("render_payload"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&strings(&[
            "prompt.yaml",
            "--style",
            "anthropic",
            "--var",
            "text=a=b",
        ]))
        .unwrap();
        assert_eq!(args.config_path, "prompt.yaml");
        assert_eq!(args.style, Some(ApiStyle::AnthropicMessages));
        assert_eq!(args.variables["text"], "a=b");
        assert!(!args.list_variables);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&strings(&["--variables"])).is_err());
        assert!(parse_args(&strings(&["a.json", "b.json"])).is_err());
        assert!(parse_args(&strings(&["a.json", "--style", "gemini"])).is_err());
        assert!(parse_args(&strings(&["a.json", "--var", "novalue"])).is_err());
    }
}
