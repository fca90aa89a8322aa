// ABOUTME: Container image reference validation.
// ABOUTME: Accepts nginx, nginx:tag, registry:port/image:tag@digest and keeps the text verbatim.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: {0:?}")]
    InvalidChar(char),

    #[error("invalid image reference format: {0}")]
    InvalidFormat(String),
}

/// A validated image reference.
///
/// The reference is handed to the engine exactly as written; no default tag
/// is appended, so the engine's own defaulting rules apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    raw: String,
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        if let Some(c) = raw
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '/' | ':' | '.' | '-' | '_' | '@'))
        {
            return Err(ParseImageRefError::InvalidChar(c));
        }

        let without_digest = match raw.split_once('@') {
            Some((_, "")) => return Err(ParseImageRefError::InvalidFormat(raw.to_string())),
            Some((before, _)) => before,
            None => raw,
        };

        // A colon followed by a slash belongs to a registry port, not a tag.
        let name = match without_digest.rsplit_once(':') {
            Some((_, "")) => return Err(ParseImageRefError::InvalidFormat(raw.to_string())),
            Some((before, after)) if !after.contains('/') => before,
            _ => without_digest,
        };

        if name.is_empty() || name.starts_with('/') || name.ends_with('/') || name.contains("//") {
            return Err(ParseImageRefError::InvalidFormat(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
