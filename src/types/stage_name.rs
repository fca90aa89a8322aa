// ABOUTME: Stage name validation.
// ABOUTME: Names appear in progress output and error messages, so they must be printable.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageNameError {
    #[error("stage name cannot be empty")]
    Empty,

    #[error("stage name exceeds maximum length of 128 characters")]
    TooLong,

    #[error("stage name contains a control character")]
    ControlChar,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageName(String);

impl StageName {
    pub fn new(value: &str) -> Result<Self, StageNameError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(StageNameError::Empty);
        }
        if value.chars().count() > 128 {
            return Err(StageNameError::TooLong);
        }
        if value.chars().any(char::is_control) {
            return Err(StageNameError::ControlChar);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
