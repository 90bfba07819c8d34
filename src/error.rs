//! Error types for vmdrop.
//!
//! Only malformed input and malformed configuration are errors. A detector
//! that finds nothing reports `detected = false`, and the decision cascade
//! always ends in the duration fallback, so analysis itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VmdropError {
    // Input errors
    #[error("Invalid audio input: {message}")]
    InvalidInput { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfiguration { key: String, message: String },

    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VmdropError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            key: key.into(),
            message: message.into(),
        }
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VmdropError>;
