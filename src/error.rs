//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error (terminal setup, event reading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Activities service error with status context
    #[error("Activities service error: {message}")]
    Service {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Response parsing error
    #[error("Malformed response: {0}")]
    Parse(String),

    /// Rejected user input (bad email, missing fields)
    #[error("{0}")]
    Validation(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an activities service error without status context
    #[allow(dead_code)]
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create an activities service error with HTTP status
    pub fn service_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("Check the signup details and try again"),
            404 => Some("The activity or participant was not found"),
            422 => Some("The service rejected the request parameters"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Activities service error - try again later"),
            _ => None,
        };
        Self::Service {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error for an unexpected response shape
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a validation error for rejected user input
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The server-provided message for service errors, if this is one
    pub fn service_detail(&self) -> Option<&str> {
        match self {
            Self::Service { message, .. } => Some(message),
            _ => None,
        }
    }
}

// Convenience conversions
impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn service_status_provides_hints() {
        let err = Error::service_status("Activity not found", 404);
        match err {
            Error::Service { hint: Some(h), status: Some(404), .. } => {
                assert!(h.contains("not found"));
            }
            _ => panic!("Expected Service error with hint and status"),
        }
    }

    #[test]
    fn service_ctor_carries_no_status_or_hint() {
        let err = Error::service("The activities service is unreachable");
        match err {
            Error::Service { message, status, hint } => {
                assert_eq!(message, "The activities service is unreachable");
                assert!(status.is_none());
                assert!(hint.is_none());
            }
            _ => panic!("Expected Service error"),
        }
    }

    #[test]
    fn service_status_skips_hint_for_unmapped_codes() {
        let err = Error::service_status("Teapot", 418);
        match err {
            Error::Service { hint, status, .. } => {
                assert!(hint.is_none());
                assert_eq!(status, Some(418));
            }
            _ => panic!("Expected Service error"),
        }
    }

    #[test]
    fn service_detail_exposes_only_service_messages() {
        let err = Error::service_status("Student is already signed up", 400);
        assert_eq!(err.service_detail(), Some("Student is already signed up"));

        let err = Error::Network("connection refused".to_string());
        assert!(err.service_detail().is_none());
    }

    #[test]
    fn validation_displays_bare_message() {
        let err = Error::validation("Please enter an email address");
        assert_eq!(err.to_string(), "Please enter an email address");
    }
}
