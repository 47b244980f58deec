//! Error types for the Sea-Seq engine

use thiserror::Error;

/// Result type alias using the Sea-Seq Error
pub type Result<T> = std::result::Result<T, Error>;

/// Sea-Seq error types
///
/// Only input-stage and configuration errors are expected to end a run.
/// Enrichment and per-check failures are absorbed where they happen.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    #[error("Unsupported input type '{extension}'. Use CSV, JSON or plain text.")]
    UnsupportedFormat { extension: String },

    #[error("Malformed input in {path}: {message}")]
    MalformedInput { path: String, message: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors raised while loading the input document
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InputNotFound { .. }
                | Error::UnsupportedFormat { .. }
                | Error::MalformedInput { .. }
        )
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::InputNotFound { .. } => "INPUT_NOT_FOUND",
            Error::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Error::MalformedInput { .. } => "MALFORMED_INPUT",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::InvalidConfig { .. } => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let missing = Error::InputNotFound {
            path: "issues.csv".into(),
        };
        assert!(missing.is_input_error());
        assert_eq!(missing.code(), "INPUT_NOT_FOUND");

        let config = Error::InvalidConfig {
            key: "remote.timeout_seconds".into(),
            message: "must be greater than zero".into(),
        };
        assert!(!config.is_input_error());
        assert_eq!(config.code(), "INVALID_CONFIG");

        let io = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
        assert!(!io.is_input_error());
        assert_eq!(io.code(), "IO_ERROR");
    }

    #[test]
    fn test_messages() {
        let err = Error::UnsupportedFormat {
            extension: "pdf".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported input type 'pdf'. Use CSV, JSON or plain text."
        );
    }
}
