//! Response codes as reported by an HTTP client.
//!
//! Clients report a single integer per request: non-negative values are HTTP
//! status codes, negative values are transport-level failures described by
//! [`TransportError`].

use std::fmt;

use crate::error::RequestError;

/// Transport-level failure, encoded as a negative response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportError {
    ConnectionRefused,
    SendHeaderFailed,
    SendPayloadFailed,
    NotConnected,
    ConnectionLost,
    NoStream,
    NoHttpServer,
    OutOfMemory,
    EncodingUnsupported,
    StreamWrite,
    ReadTimeout,
    /// Negative code without a known meaning.
    Other(i32),
}

impl TransportError {
    /// The negative code used on the client port.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::ConnectionRefused => -1,
            Self::SendHeaderFailed => -2,
            Self::SendPayloadFailed => -3,
            Self::NotConnected => -4,
            Self::ConnectionLost => -5,
            Self::NoStream => -6,
            Self::NoHttpServer => -7,
            Self::OutOfMemory => -8,
            Self::EncodingUnsupported => -9,
            Self::StreamWrite => -10,
            Self::ReadTimeout => -11,
            Self::Other(code) => code,
        }
    }

    /// Decode a negative response code. Returns `None` for non-negative codes.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        let err = match code {
            0.. => return None,
            -1 => Self::ConnectionRefused,
            -2 => Self::SendHeaderFailed,
            -3 => Self::SendPayloadFailed,
            -4 => Self::NotConnected,
            -5 => Self::ConnectionLost,
            -6 => Self::NoStream,
            -7 => Self::NoHttpServer,
            -8 => Self::OutOfMemory,
            -9 => Self::EncodingUnsupported,
            -10 => Self::StreamWrite,
            -11 => Self::ReadTimeout,
            other => Self::Other(other),
        };
        Some(err)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionRefused => f.write_str("connection refused"),
            Self::SendHeaderFailed => f.write_str("send header failed"),
            Self::SendPayloadFailed => f.write_str("send payload failed"),
            Self::NotConnected => f.write_str("not connected"),
            Self::ConnectionLost => f.write_str("connection lost"),
            Self::NoStream => f.write_str("no stream"),
            Self::NoHttpServer => f.write_str("no HTTP server"),
            Self::OutOfMemory => f.write_str("too less RAM"),
            Self::EncodingUnsupported => f.write_str("Transfer-Encoding not supported"),
            Self::StreamWrite => f.write_str("Stream write error"),
            Self::ReadTimeout => f.write_str("read Timeout"),
            Self::Other(code) => write!(f, "unknown error ({code})"),
        }
    }
}

/// Classify a raw response code.
///
/// # Errors
///
/// - [`RequestError::Transport`] for negative codes
/// - [`RequestError::Status`] for codes outside `200..300`
pub fn classify(code: i32) -> Result<u16, RequestError> {
    if let Some(err) = TransportError::from_code(code) {
        return Err(RequestError::Transport(err));
    }
    match u16::try_from(code) {
        Ok(status @ 200..300) => Ok(status),
        _ => Err(RequestError::Status(code)),
    }
}
