//! Error types and handling for the TempoDB Rust SDK.

use std::fmt;
use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the TempoDB SDK
#[derive(Debug)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Additional context about the error
    pub context: Option<String>,
    /// The underlying source error, if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Different kinds of errors that can occur
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// Transport failures and non-success responses from the API
    #[error("Network error")]
    Network {
        /// HTTP status code, absent when no response was received
        status_code: Option<u16>,
        /// Response body, if available
        response_body: Option<String>,
    },

    /// Local input-shape errors, raised before any request is sent
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// Value that failed validation
        value: Option<String>,
        /// Validation error message
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Serialization error message
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl Error {
    /// Create a new error with the given kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            source: None,
        }
    }

    /// Attach context to the error
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a source error
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a network error
    pub fn network(status_code: Option<u16>, response_body: Option<String>) -> Self {
        Self::new(ErrorKind::Network {
            status_code,
            response_body,
        })
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(
        message: S,
        field: Option<String>,
        value: Option<String>,
    ) -> Self {
        Self::new(ErrorKind::Validation {
            field,
            value,
            message: message.into(),
        })
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Serialization {
            message: message.into(),
        })
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Configuration {
            message: message.into(),
        })
    }

    /// HTTP status of the failed response, if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Body of the failed response, if one was read
    pub fn response_body(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Network { response_body, .. } => response_body.as_deref(),
            _ => None,
        }
    }

    /// Whether the error was raised locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.kind)?;
        } else {
            write!(f, "{}", self.kind)?;
        }

        if let ErrorKind::Network {
            status_code: Some(status),
            ..
        } = &self.kind
        {
            write!(f, " (status {})", status)?;
        }

        if let Some(source) = &self.source {
            write!(f, " (caused by: {})", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        Self::network(status, None).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::configuration(format!("Invalid URL: {}", err)).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::validation("tags must be an array", Some("tags".to_string()), None);
        assert!(err.is_validation());
        assert!(err.to_string().contains("tags must be an array"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::configuration("bad host").with_context("Building client");
        assert_eq!(err.to_string(), "Building client: Configuration error: bad host");
    }

    #[test]
    fn test_network_error_accessors() {
        let err = Error::network(Some(403), Some("forbidden".to_string()));
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.response_body(), Some("forbidden"));
        assert!(!err.is_validation());
        assert!(err.to_string().contains("status 403"));

        let transport = Error::network(None, None);
        assert_eq!(transport.status_code(), None);
        assert_eq!(transport.response_body(), None);
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err.kind, ErrorKind::Serialization { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
