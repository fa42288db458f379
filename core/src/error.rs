use std::fmt;
use thiserror::Error;

/// The error type for cloudstack-sign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument is outside of what the operation accepts
    /// (parameter type, scheme, port, path, query, seek target).
    InvalidArgument,

    /// The request body has been closed.
    BodyClosed,

    /// The request body has been detached from its buffer.
    BodyDetached,

    /// The request body is read only.
    NotWritable,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors (conversion, I/O, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was caused by using a body in a terminal state.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::BodyClosed | ErrorKind::BodyDetached | ErrorKind::NotWritable
        )
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create a body closed error
    pub fn body_closed() -> Self {
        Self::new(ErrorKind::BodyClosed, "request body has been closed")
    }

    /// Create a body detached error
    pub fn body_detached() -> Self {
        Self::new(ErrorKind::BodyDetached, "request body has been detached")
    }

    /// Create a not writable error
    pub fn not_writable() -> Self {
        Self::new(ErrorKind::NotWritable, "request body is not writable")
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::BodyClosed => write!(f, "body closed"),
            ErrorKind::BodyDetached => write!(f, "body detached"),
            ErrorKind::NotWritable => write!(f, "not writable"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        let kind = match err.kind() {
            ErrorKind::InvalidArgument => std::io::ErrorKind::InvalidInput,
            ErrorKind::NotWritable => std::io::ErrorKind::Unsupported,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_errors() {
        assert_eq!(Error::body_closed().kind(), ErrorKind::BodyClosed);
        assert_eq!(Error::body_detached().kind(), ErrorKind::BodyDetached);
        assert!(Error::not_writable().is_state_error());
        assert!(!Error::invalid_argument("invalid port: 0").is_state_error());
    }

    #[test]
    fn test_into_io_error() {
        let err: std::io::Error = Error::invalid_argument("negative seek").into();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "negative seek");
    }
}
