//! Error types for the CLI

use calcpad::config::ConfigError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Terminal setup or restore failed
    #[error("Terminal error: {message}")]
    Terminal {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a terminal error
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("bad arg"));
    }

    #[test]
    fn test_terminal_error() {
        let err = CliError::terminal("not a tty");
        assert_eq!(err.to_string(), "Terminal error: not a tty");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_config_error_from() {
        let config_err = ConfigError::Invalid {
            field: "format.decimal_places".to_string(),
            reason: "must be at most 15".to_string(),
        };
        let cli_err: CliError = config_err.into();
        assert!(cli_err.to_string().starts_with("Configuration error"));
        assert!(cli_err.to_string().contains("decimal_places"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let cli_err: CliError = json_err.into();
        assert!(cli_err.to_string().contains("JSON"));
    }
}
