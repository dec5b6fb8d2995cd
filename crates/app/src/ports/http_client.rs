//! HTTP client port — the connection-oriented client the request component
//! drives for every round trip.
//!
//! The call sequence for one request is always
//! [`begin`](HttpClient::begin) → configuration calls →
//! [`send_request`](HttpClient::send_request) → [`end`](HttpClient::end).
//! `end` is also called when `begin` fails.

use std::future::Future;
use std::time::Duration;

use httpaction_domain::error::HttpActionError;
use httpaction_domain::method::Method;
use httpaction_domain::tls::TlsStrategy;

/// A single-connection HTTP client, reused sequentially across requests.
pub trait HttpClient: Send {
    /// One-time initialisation, called from the owning component's `setup`.
    ///
    /// Clients that need to build TLS state up front do it here. The default
    /// implementation does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpActionError::Setup`] if the client cannot be initialised
    /// with the given strategy.
    fn prepare(&mut self, _tls: &TlsStrategy) -> Result<(), HttpActionError> {
        Ok(())
    }

    /// Open a connection to `url`, applying the certificate or fingerprint
    /// carried by `tls` when there is one.
    ///
    /// Returns `false` if the connection cannot be set up.
    fn begin(&mut self, url: &str, tls: &TlsStrategy) -> bool;

    /// Upper bound for the upcoming request.
    fn set_timeout(&mut self, timeout: Duration);

    fn set_user_agent(&mut self, user_agent: &str);

    /// Append a request header. Existing headers with the same name are kept.
    fn add_header(&mut self, name: &str, value: &str);

    /// Send the request and wait for the response status.
    ///
    /// Non-negative values are HTTP status codes; negative values are
    /// transport errors as described by
    /// [`TransportError`](httpaction_domain::response::TransportError).
    fn send_request(&mut self, method: Method, body: &str) -> impl Future<Output = i32> + Send;

    /// Close the connection and forget per-request configuration.
    fn end(&mut self);
}
