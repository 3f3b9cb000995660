//! Transport error types

use std::time::Duration;

/// Errors that can occur while performing a remote verification request.
///
/// A transport failure never surfaces to the user as a fault: the
/// verification simply stays invalid.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The response body is not a boolean verdict.
    #[error("Unrecognized verdict: {body}")]
    Verdict {
        /// Raw response body.
        body: String,
    },
}

impl TransportError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new verdict parse error.
    pub fn verdict(body: impl Into<String>) -> Self {
        Self::Verdict { body: body.into() }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
