//! Error types for the Hypothesis client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Remote failures are classified by HTTP status into the categories a
//! caller usually branches on (see [`ErrorKind`]); everything else is a
//! local error raised before or after the round trip.

use thiserror::Error;

/// The main error type for the Hypothesis client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Remote API Errors
    // ============================================================================
    #[error("Authentication failed, check your API key (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("Permission denied for this action (HTTP 403): {body}")]
    Forbidden { body: String },

    #[error("Resource not found (HTTP 404): {body}")]
    NotFound { body: String },

    #[error("Request rejected by the API (HTTP {status}): {body}")]
    Validation { status: u16, body: String },

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unreadable API response (HTTP {status}): {message}")]
    InvalidResponse { status: u16, message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Local Errors
    // ============================================================================
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential missing or rejected (401)
    Authentication,
    /// Credential valid but lacks access (403)
    Permission,
    /// Referenced resource does not exist (404)
    NotFound,
    /// Malformed request or filter combination (400, 409, 422)
    Validation,
    /// Connectivity, timeout or server-side failure
    Transport,
    /// Raised locally without reaching the API
    Local,
}

impl Error {
    /// Classify a non-success HTTP status into an error
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => Self::Authentication { status, body },
            403 => Self::Forbidden { body },
            404 => Self::NotFound { body },
            400 | 409 | 422 => Self::Validation { status, body },
            _ => Self::Api { status, body },
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// HTTP status code carried by this error, if it came from the API
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. }
            | Error::Validation { status, .. }
            | Error::Api { status, .. }
            | Error::InvalidResponse { status, .. } => Some(*status),
            Error::Forbidden { .. } => Some(403),
            Error::NotFound { .. } => Some(404),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Forbidden { .. } => ErrorKind::Permission,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Validation { .. } => ErrorKind::Validation,
            // Request timeout and rate limiting are transient, not malformed input
            Error::Api {
                status: 408 | 429, ..
            } => ErrorKind::Transport,
            Error::Api { status, .. } if (400..500).contains(status) => ErrorKind::Validation,
            Error::Api { .. }
            | Error::InvalidResponse { .. }
            | Error::Http(_)
            | Error::Timeout { .. } => ErrorKind::Transport,
            _ => ErrorKind::Local,
        }
    }

    /// Check if this error came from the network or the server side
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

/// Result type alias for the Hypothesis client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api_key");
        assert_eq!(err.to_string(), "Missing required config field: api_key");

        let err = Error::from_status(500, "boom");
        assert_eq!(err.to_string(), "API request failed with status 500: boom");
    }

    #[test_case(401, ErrorKind::Authentication ; "unauthorized")]
    #[test_case(403, ErrorKind::Permission ; "forbidden")]
    #[test_case(404, ErrorKind::NotFound ; "not found")]
    #[test_case(400, ErrorKind::Validation ; "bad request")]
    #[test_case(409, ErrorKind::Validation ; "conflict")]
    #[test_case(422, ErrorKind::Validation ; "unprocessable")]
    #[test_case(418, ErrorKind::Validation ; "other client error")]
    #[test_case(408, ErrorKind::Transport ; "request timeout")]
    #[test_case(429, ErrorKind::Transport ; "rate limited")]
    #[test_case(500, ErrorKind::Transport ; "server error")]
    #[test_case(503, ErrorKind::Transport ; "unavailable")]
    fn test_from_status_kind(status: u16, kind: ErrorKind) {
        let err = Error::from_status(status, "");
        assert_eq!(err.kind(), kind);
        assert_eq!(err.status(), Some(status));
    }

    #[test]
    fn test_local_errors() {
        assert_eq!(Error::invalid_argument("x").kind(), ErrorKind::Local);
        assert_eq!(Error::config("x").kind(), ErrorKind::Local);
        assert!(Error::config("x").status().is_none());
        assert!(Error::Timeout { timeout_ms: 10 }.is_transport());

        let garbled = Error::InvalidResponse {
            status: 200,
            message: "expected value".to_string(),
        };
        assert!(garbled.is_transport());
        assert_eq!(garbled.status(), Some(200));
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
