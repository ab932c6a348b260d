//! Input decoding configuration.

use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable consulted when no encoding is given on the command line.
pub const ENCODING_ENV_VAR: &str = "LINECMP_ENCODING";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),
}

/// Text encoding used to decode both input files.
///
/// Wraps an `encoding_rs` encoding resolved from a WHATWG label such as
/// `utf-8`, `shift_jis` or `windows-1252`. Defaults to UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub fn utf8() -> Self {
        TextEncoding(encoding_rs::UTF_8)
    }

    /// Resolve an encoding from its label (case-insensitive, surrounding whitespace ignored).
    pub fn for_label(label: &str) -> Result<Self, ConfigError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(TextEncoding)
            .ok_or_else(|| ConfigError::UnknownEncoding(label.to_owned()))
    }

    /// Resolve from an explicit label, then `LINECMP_ENCODING`, then UTF-8.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve_with(explicit, std::env::var(ENCODING_ENV_VAR).ok().as_deref())
    }

    /// Resolve from an explicit label, then `fallback`, then UTF-8. A blank
    /// fallback counts as unset.
    fn resolve_with(explicit: Option<&str>, fallback: Option<&str>) -> Result<Self, ConfigError> {
        match explicit.or(fallback.filter(|label| !label.trim().is_empty())) {
            Some(label) => Self::for_label(label),
            None => Ok(Self::default()),
        }
    }

    /// Canonical name of the encoding (e.g. `UTF-8`, `Shift_JIS`).
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decode `bytes` strictly. Returns `None` if the input is malformed.
    ///
    /// A byte-order mark is kept as part of the text.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl FromStr for TextEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_label(s)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
