use std::io;
use thiserror::Error;

/// Application-wide error type.
///
/// The classifier itself only ever produces `InvalidInput` (per request) and
/// `Configuration` (at load time). The remaining variants come from the
/// collaborators around it: the history store and the remote classifier.
#[derive(Debug, Error)]
pub enum AppError {
    /// The text handed to the classifier is empty or has nothing to analyze.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed rule table, invalid tuning values or a bad environment value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors originating from the history database (`sqlx`).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failures talking to the remote model: transport, status or reply shape.
    #[error("Remote classifier error: {0}")]
    Remote(String),
}

impl AppError {
    /// Whether the error was caused by the caller's input rather than the system.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Configuration(format!("Invalid pattern: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Configuration(format!("Validation errors: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Configuration(format!("URL parse error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Remote(format!("HTTP error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_flag() {
        assert!(AppError::InvalidInput("empty".into()).is_invalid_input());
        assert!(!AppError::Configuration("bad".into()).is_invalid_input());
    }

    #[test]
    fn test_regex_error_is_configuration() {
        let err: AppError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().starts_with("Configuration error: Invalid pattern"));
    }
}
