//! Vendor/Library/Name/Version identities of IP-XACT documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The identity tuple used to reference IP-XACT documents.
///
/// Displayed as `vendor:library:name:version`, which is also the format
/// accepted by [`FromStr`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Vlnv {
    /// The vendor, e.g. `tut.fi`.
    pub vendor: String,
    /// The library, e.g. `ip.hw`.
    pub library: String,
    /// The document name. For components this is also the default module name.
    pub name: String,
    /// The version string.
    pub version: String,
}

impl Vlnv {
    /// Creates a new identity from its four parts.
    pub fn new(
        vendor: impl Into<String>,
        library: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            library: library.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Vlnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

/// Error type for parsing `vendor:library:name:version` strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid VLNV: '{input}'")]
pub struct ParseVlnvError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Vlnv {
    type Err = ParseVlnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [vendor, library, name, version] if !name.is_empty() => {
                Ok(Vlnv::new(*vendor, *library, *name, *version))
            }
            _ => Err(ParseVlnvError {
                input: s.to_string(),
            }),
        }
    }
}
