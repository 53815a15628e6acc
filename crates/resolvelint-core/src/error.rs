//! Error types for resolvelint
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for lint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for resolvelint
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration text could not be parsed into a tree
    #[error("Parse error: {0}")]
    Parse(String),

    /// A variable script could not be compiled
    #[error("Script error: {0}")]
    Script(String),

    /// A rule failed while auditing a directive
    #[error("Rule error ({rule}): {message}")]
    Rule {
        /// Rule name
        rule: String,
        /// Error message
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (reading configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a script compilation error
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Create a rule-specific error
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rule {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
