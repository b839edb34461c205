//! Configuration types deserialized from `kactus.toml`.

use serde::Deserialize;

/// The top-level generator configuration parsed from `kactus.toml`.
///
/// Every section is optional; an empty file yields [`GeneratorConfig::default`].
#[derive(Debug, Default, Deserialize)]
pub struct GeneratorConfig {
    /// Tool and plugin identification written into the file header.
    #[serde(default)]
    pub generator: GeneratorMeta,
    /// Per-user header metadata.
    #[serde(default)]
    pub header: HeaderConfig,
    /// Output location and implementation preservation settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Conventions of the expression language used by parameter values.
    #[serde(default)]
    pub expressions: ExpressionConfig,
}

/// Names and versions of the generating tool, shown in the file header.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneratorMeta {
    /// The tool name (header line `Tool :`).
    pub tool: String,
    /// The tool version appended after the tool name.
    pub tool_version: String,
    /// The plugin name (header line `Plugin :`).
    pub plugin: String,
    /// The plugin version appended after the plugin name.
    pub plugin_version: String,
}

impl Default for GeneratorMeta {
    fn default() -> Self {
        Self {
            tool: "Kactus2".to_string(),
            tool_version: String::new(),
            plugin: "Verilog generator".to_string(),
            plugin_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Header fields that depend on who runs the generator.
#[derive(Debug, Default, Deserialize)]
pub struct HeaderConfig {
    /// The user name written as `Created by`.
    #[serde(default)]
    pub author: String,
}

/// Where generated files go and how existing files are treated.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives generated files, relative to the caller's root.
    pub directory: String,
    /// File extension of generated files, without the leading dot.
    pub extension: String,
    /// Whether the body of an existing output file is carried over.
    pub preserve_implementation: bool,
    /// What to do when an existing output file cannot be parsed for preservation.
    pub on_preserve_failure: PreserveFailurePolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            extension: "v".to_string(),
            preserve_implementation: true,
            on_preserve_failure: PreserveFailurePolicy::Overwrite,
        }
    }
}

/// Behaviour when the previous output file is malformed.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreserveFailurePolicy {
    /// Generate a fresh file without a preserved body (default).
    #[default]
    Overwrite,
    /// Leave the existing file untouched and report the failure.
    Abort,
}

/// Conventions of the expression language used in parameter values and bounds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    /// Prefix of parameter reference ids.
    ///
    /// A token carrying this prefix that names no parameter in scope is an
    /// unresolved reference. Tokens without the prefix that name nothing are
    /// treated as plain HDL identifiers. An empty prefix disables the check.
    pub reference_prefix: String,
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            reference_prefix: "uuid_".to_string(),
        }
    }
}
