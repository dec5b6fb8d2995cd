//! TLS verification strategy, chosen once when the component is built.

use std::fmt;

/// How the client should verify the server when connecting over TLS.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum TlsStrategy {
    /// Platform defaults; the URL alone is passed to the client.
    #[default]
    None,
    /// Pin the server certificate by its SHA-1 fingerprint (hex).
    Fingerprint(String),
    /// Trust the given PEM-encoded CA certificate.
    Certificate(String),
}

impl TlsStrategy {
    /// Short label used in config dumps.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fingerprint(_) => "fingerprint",
            Self::Certificate(_) => "certificate",
        }
    }
}

// Keep key material out of logs.
impl fmt::Debug for TlsStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TlsStrategy::{}", self.label())
    }
}
