//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "kactus.toml";

/// Loads and validates a `kactus.toml` configuration from a project directory.
///
/// Reads `<project_dir>/kactus.toml`, parses it, and validates its values.
pub fn load_config(project_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but a missing file yields the default configuration.
pub fn load_config_or_default(project_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(GeneratorConfig::default());
    }
    load_config(project_dir)
}

/// Parses and validates a `kactus.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required values are present and consistent.
fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    if config.generator.tool.trim().is_empty() {
        return Err(ConfigError::MissingField("generator.tool".to_string()));
    }
    if config.output.extension.is_empty() {
        return Err(ConfigError::MissingField("output.extension".to_string()));
    }
    if config.output.extension.starts_with('.') {
        return Err(ConfigError::ValidationError(format!(
            "output.extension must not start with a dot, got '{}'",
            config.output.extension
        )));
    }
    if config
        .expressions
        .reference_prefix
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
    {
        return Err(ConfigError::ValidationError(format!(
            "expressions.reference_prefix must be an identifier prefix, got '{}'",
            config.expressions.reference_prefix
        )));
    }
    Ok(())
}
