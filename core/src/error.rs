//! Error types for the IRIS API client.
//!
//! # Design
//! Every non-200 response collapses into `Status`, carrying only the numeric
//! code. The response body is never read on that path, so a server-provided
//! message in the envelope is not surfaced. Decode failures stay distinct from
//! status failures so callers can tell "the server said no" from "the server
//! said something we did not understand."

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used by every client operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by `IrisClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required setting is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The base URL or the relative path could not be parsed or joined.
    #[error("invalid URL {url:?}: {reason}")]
    Url { url: String, reason: String },

    /// The method or a header could not be turned into a native request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// DNS, connect, TLS, timeout or body-read failure in the transport.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with something other than 200.
    #[error("unexpected status code: {status}")]
    Status { status: u16 },

    /// The response body could not be decoded into the expected envelope.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    pub(crate) fn url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Url {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Status code carried by a `Status` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
