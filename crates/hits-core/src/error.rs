//! Shared error type across hits crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientCode {
    /// Invalid input / empty identifier.
    BadRequest,
    /// Identifier exceeds the configured maximum length.
    UriTooLong,
    /// Path is not canonical; caller must follow the redirect.
    Redirect,
    /// The caller gave up waiting for the worker.
    Timeout,
    /// Renderer or counting backend failed.
    Unavailable,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UriTooLong => "URI_TOO_LONG",
            ClientCode::Redirect => "REDIRECT",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HitsError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HitsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request-uri too long")]
    UriTooLong,
    #[error("redirect required: {location}")]
    Redirect { location: String },
    #[error("timed out waiting for preview")]
    Timeout,
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl HitsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HitsError::BadRequest(_) => ClientCode::BadRequest,
            HitsError::UriTooLong => ClientCode::UriTooLong,
            HitsError::Redirect { .. } => ClientCode::Redirect,
            HitsError::Timeout => ClientCode::Timeout,
            HitsError::BackendUnavailable(_) => ClientCode::Unavailable,
            HitsError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HitsError::Internal(_) => ClientCode::Internal,
        }
    }
}
