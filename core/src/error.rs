//! Common error types for modelspec values.

use thiserror::Error;

/// Errors that can occur while constructing option values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A pattern source did not compile.
    #[error("Invalid pattern /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A range whose start lies past its end.
    #[error("Invalid range {start}..={end}: start is greater than end")]
    InvalidRange { start: i64, end: i64 },
}

impl ValueError {
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Result type for value construction.
pub type ValueResult<T> = Result<T, ValueError>;
