//! Error types for form transport.

use std::fmt;

/// Why a submission did not reach a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The action is not a usable URL.
    InvalidAction(String),
    /// The method name is not one a form may use.
    InvalidMethod(String),
    /// The client could not be constructed.
    Client(String),
    /// No connection could be made.
    Connect(String),
    /// The server did not answer in time.
    Timeout,
    /// The server answered with a non-2xx status.
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// Response body, when there was one.
        body: Option<String>,
    },
    /// Any other transport failure.
    Transport(String),
}

impl NetworkError {
    /// The HTTP status, for rejected submissions.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether trying again later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::Connect(_) => true,
            Self::Rejected { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction(msg) => write!(f, "invalid form action: {msg}"),
            Self::InvalidMethod(method) => write!(f, "unsupported form method: {method}"),
            Self::Client(msg) => write!(f, "failed to build HTTP client: {msg}"),
            Self::Connect(msg) => write!(f, "connection failed: {msg}"),
            Self::Timeout => f.write_str("submission timed out"),
            Self::Rejected { status, body: Some(body) } => {
                write!(f, "server rejected submission with {status}: {body}")
            }
            Self::Rejected { status, body: None } => {
                write!(f, "server rejected submission with {status}")
            }
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidAction(err.to_string())
    }
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(NetworkError::Timeout.is_transient());
        assert!(NetworkError::Rejected { status: 503, body: None }.is_transient());
        assert!(!NetworkError::Rejected { status: 422, body: None }.is_transient());
        assert!(!NetworkError::InvalidAction("x".into()).is_transient());
    }

    #[test]
    fn test_rejected_display_includes_body() {
        let err = NetworkError::Rejected {
            status: 400,
            body: Some("email taken".into()),
        };
        assert_eq!(err.to_string(), "server rejected submission with 400: email taken");
    }
}
