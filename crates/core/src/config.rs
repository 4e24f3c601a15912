//! Analyzer configuration.
//!
//! Configuration is optional; [`AnalyzerConfig::default`] reproduces the
//! plain behavior (only `if` is treated as a conditional, unknown tags are
//! skipped). Files are YAML or JSON, selected by extension.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tags that can be parsed as conditionals.
pub const SUPPORTED_CONDITIONAL_TAGS: &[&str] = &["if", "unless", "case"];

/// Default file name written by frontends.
pub const DEFAULT_CONFIG_FILE: &str = "template-deps.yaml";

fn default_conditional_tags() -> Vec<String> {
    vec!["if".to_string()]
}

fn default_config_version() -> String {
    "0.1.0".to_string()
}

/// Serializable analyzer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Schema/config version. This is about the config format, not the crate version.
    #[serde(default = "default_config_version")]
    pub config_version: String,
    /// Tag names whose branches are walked for assignments.
    #[serde(default = "default_conditional_tags")]
    pub conditional_tags: Vec<String>,
    /// Reject tags outside the known Liquid set instead of skipping them.
    #[serde(default)]
    pub strict_tags: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            conditional_tags: default_conditional_tags(),
            strict_tags: false,
        }
    }
}

impl AnalyzerConfig {
    /// Whether `tag` should become a conditional node.
    pub fn is_conditional(&self, tag: &str) -> bool {
        self.conditional_tags.iter().any(|t| t == tag)
    }

    /// Check that every configured conditional tag is one the parser understands.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .conditional_tags
            .iter()
            .find(|tag| !SUPPORTED_CONDITIONAL_TAGS.contains(&tag.as_str()))
        {
            Some(tag) => Err(ConfigError::UnknownConditionalTag(tag.clone())),
            None => Ok(()),
        }
    }

    /// Parse a config body in the format implied by `extension`.
    pub fn from_str_with_format(body: &str, extension: &str) -> Result<Self> {
        let config: AnalyzerConfig = match extension {
            "yaml" | "yml" => {
                serde_yaml::from_str(body).context("Failed to parse analyzer config YAML")?
            }
            "json" => serde_json::from_str(body).context("Failed to parse analyzer config JSON")?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string()).into()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Load and validate an analyzer config from disk.
pub fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read analyzer config at {}", path.display()))?;
    AnalyzerConfig::from_str_with_format(&body, extension)
        .with_context(|| format!("Invalid analyzer config at {}", path.display()))
}
