//! Parsing and validation of `kactus.toml` generator configuration files.
//!
//! The configuration supplies everything the generation core treats as opaque
//! pass-through data: header metadata (tool, plugin, author), output location,
//! the implementation-preservation policy, and the reference-id convention used
//! by parameter expressions.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_config_or_default, CONFIG_FILE_NAME};
pub use types::*;
