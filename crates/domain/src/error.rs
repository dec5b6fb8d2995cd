//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HttpActionError`] via `#[from]` at the port boundaries.

use crate::response::TransportError;

/// Top-level error for the httpaction workspace.
#[derive(Debug, thiserror::Error)]
pub enum HttpActionError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("request error")]
    Request(#[from] RequestError),

    /// A component or client failed its one-time initialisation.
    #[error("setup failed")]
    Setup(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("unsupported HTTP method {0:?}")]
    UnsupportedMethod(String),

    #[error("header name must not be empty")]
    EmptyHeaderName,
}

/// Why a single request round trip did not succeed.
///
/// All variants are reported the same way by the executor (warning status
/// plus a warning log); the distinction only exists for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// No URL has been configured on the component yet.
    #[error("no URL configured")]
    MissingUrl,

    /// The client refused to open a connection for the URL.
    #[error("HTTP Request failed at the begin phase. Please check the configuration")]
    Begin,

    /// The client reported a negative, transport-level status.
    #[error("transport error: {0}")]
    Transport(TransportError),

    /// The server answered outside of the 2xx range.
    #[error("unexpected status code {0}")]
    Status(i32),
}
