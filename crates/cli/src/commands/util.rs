use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format shared by every analysis command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Render `value` as JSON/YAML, or through `text` for human-readable output.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("Failed to serialize output to YAML")
        }
    }
}
