//! Error types for remote requests
//!
//! Every variant is a network-or-server failure: the dashboard does not
//! distinguish further when deciding how to react, but the variants keep the
//! detail for logs and for the CLI.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the remote API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("{method} {url} returned {status}")]
    Status {
        /// Request method
        method: Method,
        /// Request URL
        url: String,
        /// Response status
        status: StatusCode,
    },

    /// The response body did not have the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode {
        /// Request URL
        url: String,
        /// Decoder message
        message: String,
    },

    /// A URL could not be built from the configured base
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create a decode error
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status of the failed response, if the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Decode { .. } | Self::InvalidUrl(_) => None,
        }
    }

    /// Whether the same request may succeed when retried unchanged
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Decode { .. } | Self::InvalidUrl(_) => false,
        }
    }

    /// Whether the server rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

impl From<ClientError> for bizdash_core::Error {
    fn from(err: ClientError) -> Self {
        Self::Remote(err.to_string())
    }
}
