//! reqwest adapter error types.

use httpaction_domain::error::HttpActionError;
use httpaction_domain::response::TransportError;

/// Errors raised while building a reqwest client.
#[derive(Debug, thiserror::Error)]
pub enum ReqwestClientError {
    /// The configured CA certificate could not be loaded.
    #[error("invalid CA certificate")]
    InvalidCertificate(#[source] reqwest::Error),

    /// reqwest exposes no way to pin a certificate fingerprint.
    #[error("certificate fingerprint pinning is not supported by the reqwest client")]
    FingerprintUnsupported,

    /// The underlying client could not be built.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}

impl From<ReqwestClientError> for HttpActionError {
    fn from(err: ReqwestClientError) -> Self {
        HttpActionError::Setup(Box::new(err))
    }
}

/// Map a reqwest send failure onto the negative-code transport taxonomy.
pub(crate) fn transport_error(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::ReadTimeout
    } else if err.is_connect() {
        TransportError::ConnectionRefused
    } else if err.is_builder() {
        TransportError::SendHeaderFailed
    } else if err.is_body() || err.is_request() {
        TransportError::SendPayloadFailed
    } else if err.is_decode() {
        TransportError::EncodingUnsupported
    } else {
        TransportError::ConnectionLost
    }
}
