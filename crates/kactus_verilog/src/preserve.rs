//! Recovery of hand-written code from a previously generated file.
//!
//! The text between the end of the module header and `endmodule` belongs to
//! the user, except for whatever precedes the merge marker, which the
//! generator rewrites. Text after `endmodule` is kept as well.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::syntax::MARKER;

/// Why a previous file could not be used for preservation.
#[derive(Debug, thiserror::Error)]
pub enum PreserveError {
    /// The file exists but could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// No `module <name>` header.
    #[error("no module header found")]
    NoModuleHeader,
    /// The module header is never closed with `);`.
    #[error("the module header is not terminated with `);`")]
    NoHeaderEnd,
    /// No `endmodule` after the header.
    #[error("no `endmodule` after the module header")]
    NoEndModule,
    /// More than one module header.
    #[error("found {0} module headers, expected exactly one")]
    MultipleModules(usize),
    /// A search pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// User text recovered from a previous file.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PreservedText {
    /// The module body below the merge marker, trimmed of blank lines.
    pub implementation: String,
    /// Everything after `endmodule`, minus the line break ending it.
    pub post_module: String,
}

/// Reads the implementation of a previously generated file.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn read_implementation(path: &Path) -> Result<Option<PreservedText>, PreserveError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no previous file at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(PreserveError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    extract_implementation(&text).map(Some)
}

/// Splits the text of a previous file into implementation and post-module
/// text.
pub fn extract_implementation(text: &str) -> Result<PreservedText, PreserveError> {
    let text = text.replace('\r', "");

    let header = Regex::new(r"(?m)^\s*module\s+\w+")?;
    let headers: Vec<_> = header.find_iter(&text).collect();
    let start = match headers.as_slice() {
        [] => return Err(PreserveError::NoModuleHeader),
        [only] => only.end(),
        many => return Err(PreserveError::MultipleModules(many.len())),
    };

    let body_start = header_end(&text, start).ok_or(PreserveError::NoHeaderEnd)?;

    let endmodule = Regex::new(r"\bendmodule\b")?;
    let end = endmodule
        .find(&text[body_start..])
        .ok_or(PreserveError::NoEndModule)?;
    let body = &text[body_start..body_start + end.start()];
    let after = &text[body_start + end.end()..];

    let body = match body.find(MARKER) {
        Some(at) => {
            let rest = &body[at + MARKER.len()..];
            rest.split_once('\n').map_or("", |(_, tail)| tail)
        }
        None => body,
    };

    Ok(PreservedText {
        implementation: trim_blank_lines(body).to_string(),
        post_module: after.strip_prefix('\n').unwrap_or(after).to_string(),
    })
}

/// Finds the byte offset just past the `);` closing the module header.
///
/// A `);` on a line after a `//` or `/*` is inside a comment and skipped.
fn header_end(text: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    while let Some(found) = text[offset..].find(");") {
        let at = offset + found;
        let line_start = text[..at].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &text[line_start.max(from)..at];
        if !prefix.contains("//") && !prefix.contains("/*") {
            return Some(at + 2);
        }
        offset = at + 2;
    }
    None
}

fn trim_blank_lines(text: &str) -> &str {
    let text = text.trim_end();
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &text[start..]
}
