//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parse error.
    #[error("schema parse error: {0}")]
    Parse(#[from] astgen_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] astgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid render option.
    #[error("invalid value '{value}' for option '{option}'")]
    InvalidOption {
        /// Option name.
        option: &'static str,
        /// Rejected value.
        value: String,
    },

    /// No tree with the requested base class.
    #[error("no tree with base class '{base}'")]
    TreeNotFound {
        /// Requested base class name.
        base: String,
    },
}

impl CodegenError {
    /// Creates an invalid option error.
    pub fn invalid_option(option: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            value: value.into(),
        }
    }
}
