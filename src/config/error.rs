//! Errors raised while loading and validating configuration

use thiserror::Error;

/// Failure to produce a usable [`Settings`](crate::config::Settings)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required file layer is missing
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// The merged sources do not deserialize into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is present but out of range or malformed
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted path of the offending key, e.g. `database.url`
        field: String,
        message: String,
    },

    /// `CATALOG_APP_ENV` or another variable holds an unusable value
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `CATALOG_CONFIG_DIR` and `CATALOG_CONFIG_FILE` were both set
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// Key the error is about, or `"configuration"` when it is not tied to one
    pub fn key(&self) -> &str {
        match self {
            ConfigError::ValidationError { field, .. } => field,
            _ => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_the_offending_field() {
        let error = ConfigError::validation("server.port", "Port must be between 1 and 65535");
        assert_eq!(error.key(), "server.port");
        assert_eq!(
            error.to_string(),
            "Validation error: server.port - Port must be between 1 and 65535"
        );

        assert_eq!(ConfigError::file_not_found("config/default.toml").key(), "configuration");
    }
}
