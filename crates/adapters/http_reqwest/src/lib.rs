//! # httpaction-adapter-http-reqwest
//!
//! [`HttpClient`] implementation backed by [`reqwest`].
//!
//! `begin` only validates the URL and selects the client matching the TLS
//! strategy; configuration calls are buffered until `send_request` builds
//! and sends the request. `end` forgets the buffered request.
//!
//! ## TLS strategies
//!
//! | Strategy | Behaviour |
//! |----------|-----------|
//! | `None` | Shared default client |
//! | `Certificate` | Client trusting the PEM certificate as an extra root |
//! | `Fingerprint` | Rejected: `prepare` errors and `begin` returns `false` |
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `httpaction-app` and `httpaction-domain`.

mod error;

pub use error::ReqwestClientError;

use std::future::Future;
use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};

use httpaction_app::ports::HttpClient;
use httpaction_domain::error::HttpActionError;
use httpaction_domain::method::Method;
use httpaction_domain::response::TransportError;
use httpaction_domain::tls::TlsStrategy;

/// Request configuration collected between `begin` and `send_request`.
struct PendingRequest {
    client: Client,
    url: Url,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
}

/// reqwest-backed client. Connection pooling is handled by reqwest; one
/// request is configured at a time.
pub struct ReqwestHttpClient {
    default_client: Client,
    tls_client: Option<(TlsStrategy, Client)>,
    pending: Option<PendingRequest>,
}

impl ReqwestHttpClient {
    /// Build the shared default client.
    ///
    /// # Errors
    ///
    /// Returns [`ReqwestClientError::Build`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, ReqwestClientError> {
        Ok(Self {
            default_client: build_client(&TlsStrategy::None)?,
            tls_client: None,
            pending: None,
        })
    }

    fn client_for(&mut self, tls: &TlsStrategy) -> Result<Client, ReqwestClientError> {
        if matches!(tls, TlsStrategy::None) {
            return Ok(self.default_client.clone());
        }
        if let Some((cached, client)) = &self.tls_client {
            if cached == tls {
                return Ok(client.clone());
            }
        }
        let client = build_client(tls)?;
        self.tls_client = Some((tls.clone(), client.clone()));
        Ok(client)
    }
}

fn build_client(tls: &TlsStrategy) -> Result<Client, ReqwestClientError> {
    match tls {
        TlsStrategy::None => Client::builder().build().map_err(ReqwestClientError::Build),
        TlsStrategy::Certificate(pem) => {
            let certificate = reqwest::Certificate::from_pem(pem.as_bytes())
                .map_err(ReqwestClientError::InvalidCertificate)?;
            Client::builder()
                .add_root_certificate(certificate)
                .build()
                .map_err(ReqwestClientError::Build)
        }
        TlsStrategy::Fingerprint(_) => Err(ReqwestClientError::FingerprintUnsupported),
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
    }
}

impl HttpClient for ReqwestHttpClient {
    fn prepare(&mut self, tls: &TlsStrategy) -> Result<(), HttpActionError> {
        self.client_for(tls)?;
        tracing::debug!(tls = tls.label(), "reqwest client prepared");
        Ok(())
    }

    fn begin(&mut self, url: &str, tls: &TlsStrategy) -> bool {
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(%err, url, "invalid request URL");
                return false;
            }
        };
        let client = match self.client_for(tls) {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!(%err, tls = tls.label(), "no HTTP client for TLS strategy");
                return false;
            }
        };
        self.pending = Some(PendingRequest {
            client,
            url,
            timeout: None,
            user_agent: None,
            headers: Vec::new(),
        });
        true
    }

    fn set_timeout(&mut self, timeout: Duration) {
        if let Some(pending) = &mut self.pending {
            pending.timeout = Some(timeout);
        }
    }

    fn set_user_agent(&mut self, user_agent: &str) {
        if let Some(pending) = &mut self.pending {
            pending.user_agent = Some(user_agent.to_string());
        }
    }

    fn add_header(&mut self, name: &str, value: &str) {
        if let Some(pending) = &mut self.pending {
            pending.headers.push((name.to_string(), value.to_string()));
        }
    }

    fn send_request(&mut self, method: Method, body: &str) -> impl Future<Output = i32> + Send {
        let request = self.pending.as_ref().map(|pending| {
            let mut request = pending
                .client
                .request(to_reqwest_method(method), pending.url.clone());
            if let Some(timeout) = pending.timeout {
                request = request.timeout(timeout);
            }
            if let Some(user_agent) = &pending.user_agent {
                request = request.header(USER_AGENT, user_agent.as_str());
            }
            // `header` appends, so repeated names are all sent.
            for (name, value) in &pending.headers {
                request = request.header(name.as_str(), value.as_str());
            }
            if !body.is_empty() {
                request = request.body(body.to_string());
            }
            request
        });

        async move {
            let Some(request) = request else {
                return TransportError::NotConnected.code();
            };
            match request.send().await {
                Ok(response) => i32::from(response.status().as_u16()),
                Err(err) => {
                    tracing::debug!(%err, "reqwest send failed");
                    error::transport_error(&err).code()
                }
            }
        }
    }

    fn end(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, Uri};

    #[derive(Debug, Clone)]
    struct Recorded {
        method: String,
        path: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    type Log = Arc<Mutex<Vec<Recorded>>>;

    async fn record(
        State(log): State<Log>,
        method: axum::http::Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> StatusCode {
        let path = uri.path().to_string();
        log.lock().unwrap().push(Recorded {
            method: method.to_string(),
            path: path.clone(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
                .collect(),
            body,
        });

        if path == "/slow" {
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        path.strip_prefix("/status/")
            .and_then(|code| code.parse::<u16>().ok())
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::OK)
    }

    async fn server() -> (SocketAddr, Log) {
        let log = Log::default();
        let app = Router::new().fallback(record).with_state(log.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, log)
    }

    #[test]
    fn should_build_client_without_tls_override() {
        let client = ReqwestHttpClient::new().unwrap();
        assert!(client.tls_client.is_none());
        assert!(client.pending.is_none());
    }

    #[tokio::test]
    async fn should_send_get_and_return_status_code() {
        let (addr, log) = server().await;
        let mut client = ReqwestHttpClient::new().unwrap();

        assert!(client.begin(&format!("http://{addr}/status/204"), &TlsStrategy::None));
        client.set_timeout(Duration::from_secs(5));
        let code = client.send_request(Method::Get, "").await;
        client.end();

        assert_eq!(code, 204);
        let recorded = log.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, "GET");
        assert_eq!(recorded[0].path, "/status/204");
        assert!(recorded[0].body.is_empty());
    }

    #[tokio::test]
    async fn should_send_body_user_agent_and_duplicate_headers() {
        let (addr, log) = server().await;
        let mut client = ReqwestHttpClient::new().unwrap();

        assert!(client.begin(&format!("http://{addr}/status/500"), &TlsStrategy::None));
        client.set_user_agent("httpactiond-test");
        client.add_header("X-Test", "1");
        client.add_header("X-Test", "2");
        let code = client.send_request(Method::Post, "payload").await;
        client.end();

        assert_eq!(code, 500);
        let recorded = log.lock().unwrap();
        let request = &recorded[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.body, "payload");
        let x_test: Vec<_> = request
            .headers
            .iter()
            .filter(|(k, _)| k == "x-test")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(x_test, vec!["1", "2"]);
        assert!(
            request
                .headers
                .contains(&("user-agent".to_string(), "httpactiond-test".to_string()))
        );
    }

    #[tokio::test]
    async fn should_report_read_timeout_as_negative_code() {
        let (addr, _log) = server().await;
        let mut client = ReqwestHttpClient::new().unwrap();

        assert!(client.begin(&format!("http://{addr}/slow"), &TlsStrategy::None));
        client.set_timeout(Duration::from_millis(100));
        let code = client.send_request(Method::Get, "").await;

        assert_eq!(code, TransportError::ReadTimeout.code());
    }

    #[tokio::test]
    async fn should_report_connection_refused_as_negative_code() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let mut client = ReqwestHttpClient::new().unwrap();

        assert!(client.begin(&format!("http://{addr}/"), &TlsStrategy::None));
        let code = client.send_request(Method::Get, "").await;

        assert_eq!(code, TransportError::ConnectionRefused.code());
    }

    #[tokio::test]
    async fn should_report_not_connected_without_begin() {
        let mut client = ReqwestHttpClient::new().unwrap();
        let code = client.send_request(Method::Get, "").await;
        assert_eq!(code, TransportError::NotConnected.code());
    }

    #[tokio::test]
    async fn should_forget_request_on_end() {
        let mut client = ReqwestHttpClient::new().unwrap();
        assert!(client.begin("http://127.0.0.1:9/", &TlsStrategy::None));
        client.end();
        let code = client.send_request(Method::Get, "").await;
        assert_eq!(code, TransportError::NotConnected.code());
    }

    #[test]
    fn should_refuse_begin_for_malformed_url() {
        let mut client = ReqwestHttpClient::new().unwrap();
        assert!(!client.begin("not a url", &TlsStrategy::None));
    }

    #[test]
    fn should_refuse_fingerprint_strategy() {
        let mut client = ReqwestHttpClient::new().unwrap();
        let tls = TlsStrategy::Fingerprint("AA:BB".to_string());
        assert!(!client.begin("https://example.com/", &tls));
        assert!(matches!(
            client.prepare(&tls),
            Err(HttpActionError::Setup(_))
        ));
    }

    #[test]
    fn should_prepare_default_strategy() {
        let mut client = ReqwestHttpClient::new().unwrap();
        assert!(client.prepare(&TlsStrategy::None).is_ok());
    }
}
