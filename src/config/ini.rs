//! Line-oriented `key = value` directive files.

use std::path::Path;

use crate::foundation::error::{ShowError, ShowResult};

/// One `key = value` pair read from a directive file or synthesised from a CLI flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveLine {
    /// Directive key as written (matching is case-insensitive downstream).
    pub key: String,
    /// Raw value, with surrounding quotes already stripped.
    pub value: String,
    /// 1-based source line, 0 when the pair did not come from a file.
    pub line: usize,
}

impl DirectiveLine {
    /// A pair that did not come from a file.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line: 0,
        }
    }
}

/// Parse directive text.
///
/// Blank lines, `#` comment lines and lines without `=` are skipped. The key is everything
/// before the first `=`, trimmed. A value starting with `"` that has a closing quote is
/// replaced by the quoted text, so `=` and `#` inside quotes survive verbatim.
pub fn parse_directives(src: &str) -> Vec<DirectiveLine> {
    let mut out = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim_start();
        let value = value
            .strip_prefix('"')
            .and_then(|inner| inner.find('"').map(|end| &inner[..end]))
            .unwrap_or(value);
        out.push(DirectiveLine {
            key: key.trim().to_owned(),
            value: value.to_owned(),
            line: idx + 1,
        });
    }
    out
}

/// Read and parse a directive file.
pub fn read_directives(path: &Path) -> ShowResult<Vec<DirectiveLine>> {
    let src = std::fs::read_to_string(path).map_err(|e| ShowError::io(path, e))?;
    let lines = parse_directives(&src);
    tracing::debug!(path = %path.display(), count = lines.len(), "read directive file");
    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/unit/config/ini.rs"]
mod tests;
