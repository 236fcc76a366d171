use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use citeguard_core::{FlagOverrides, GroundingResult, Guardrails, GuardrailsConfig, Status};
use serde_json::Value;

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::exit_codes;

pub fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let answer = read_answer(&args.answer)?;
    let chunks = read_chunks(&args.chunks)?;
    let context = match &args.context {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read context {}", path.display()))?,
        None => String::new(),
    };
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GuardrailsConfig::default(),
    };

    let guard = Guardrails::new(config).context("invalid guardrails config")?;
    let result = guard
        .evaluate_json(&answer, &chunks, &context, overrides(&args))
        .with_context(|| format!("invalid chunks in {}", args.chunks.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_text(&answer, &result),
    }

    Ok(exit_code(result.status))
}

fn exit_code(status: Status) -> i32 {
    match status {
        Status::Allow | Status::Warn => exit_codes::SUCCESS,
        Status::Block => exit_codes::BLOCKED,
    }
}

fn overrides(args: &CheckArgs) -> FlagOverrides {
    if args.disable_extensions {
        return FlagOverrides::uniform(false);
    }
    let on = |set: bool| set.then_some(true);
    FlagOverrides {
        semantic_support_check: on(args.semantic),
        strict_claim_extraction: on(args.strict_claims),
        claim_citation_alignment: on(args.alignment),
        citation_dedup_penalty: on(args.dedup_penalty),
    }
}

fn read_answer(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read answer from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read answer {}", path.display()))
}

/// Accepts a bare array or the `{"retrieved_chunks": [...]}` prompt payload.
fn read_chunks(path: &Path) -> anyhow::Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read chunks {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("chunks file is not valid JSON: {}", path.display()))?;
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => match map.remove("retrieved_chunks") {
            Some(chunks) => Ok(chunks),
            None => bail!(
                "{}: object input needs a \"retrieved_chunks\" array",
                path.display()
            ),
        },
        _ => bail!("{}: expected a JSON array of chunks", path.display()),
    }
}

fn load_config(path: &Path) -> anyhow::Result<GuardrailsConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = GuardrailsConfig::from_yaml_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded guardrails config");
    Ok(config)
}

fn codes(result: &GroundingResult) -> String {
    result
        .reasons
        .iter()
        .map(|r| r.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_text(answer: &str, result: &GroundingResult) {
    match result.status {
        Status::Allow => print!("{answer}"),
        Status::Warn => {
            println!(
                "WARNING: answer may be incompletely grounded ({})",
                codes(result)
            );
            print!("{answer}");
        }
        Status::Block => eprintln!("BLOCKED: {}", codes(result)),
    }
}
