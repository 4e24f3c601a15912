use std::fs;

use anyhow::{anyhow, Context, Result};
use template_deps_core::config::{AnalyzerConfig, DEFAULT_CONFIG_FILE};

use crate::canonicalize_or_current;

/// Write a default analyzer config into `root`.
pub fn init_config_command(root: &str, force: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let config_path = root_path.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }

    fs::create_dir_all(&root_path)
        .with_context(|| format!("Failed to create root dir: {}", root_path.display()))?;
    let config = AnalyzerConfig::default();
    let yaml = serde_yaml::to_string(&config).context("Failed to serialize default config")?;
    fs::write(&config_path, yaml)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    println!("Wrote analyzer config:");
    println!("  Path: {}", config_path.display());
    println!("  Conditional tags: {}", config.conditional_tags.join(", "));
    println!("  Strict tags: {}", config.strict_tags);

    Ok(())
}
