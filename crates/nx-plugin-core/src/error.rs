//! Error types for nx-plugin-core

use thiserror::Error;

/// Result type alias using nx-plugin-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for create-nx-plugin
#[derive(Error, Debug)]
pub enum Error {
    /// Plugin or package name rejected
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Value that does not map to a known choice
    #[error("Unknown {kind}: {value}. Valid values: {valid}")]
    UnknownChoice {
        kind: String,
        value: String,
        valid: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Invalid semver version
    #[error("Invalid version format: {version}")]
    InvalidVersion { version: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown choice error
    pub fn unknown_choice(
        kind: impl Into<String>,
        value: impl Into<String>,
        valid: &[&str],
    ) -> Self {
        Self::UnknownChoice {
            kind: kind.into(),
            value: value.into(),
            valid: valid.join(", "),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }
}
