use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(katsaus::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(katsaus::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(katsaus::google_calendar))]
    GoogleCalendar(String),

    #[error("Gmail API error: {0}")]
    #[diagnostic(code(katsaus::gmail))]
    Gmail(String),

    #[error("Unrecognized time expression: {0}")]
    #[diagnostic(code(katsaus::time_expr))]
    UnrecognizedTimeExpr(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(katsaus::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(katsaus::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(katsaus::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(katsaus::other))]
    Other(String),
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AgentResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
#[allow(dead_code)]
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create Gmail errors
pub fn gmail_error(message: &str) -> Error {
    Error::Gmail(message.to_string())
}
