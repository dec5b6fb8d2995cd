//! HTTP request component — performs one round trip per `send` using the
//! configuration most recently written into it.

use std::fmt::Write as _;
use std::time::Duration;

use httpaction_domain::error::{HttpActionError, RequestError};
use httpaction_domain::header::Header;
use httpaction_domain::method::Method;
use httpaction_domain::request::RequestConfig;
use httpaction_domain::response;
use httpaction_domain::status::ComponentStatus;
use httpaction_domain::tls::TlsStrategy;

use crate::component::{Component, SetupPriority};
use crate::ports::HttpClient;

/// Issues HTTP requests through an [`HttpClient`] and tracks the outcome
/// of the most recent one in its warning status.
pub struct HttpRequestComponent<C> {
    client: C,
    tls: TlsStrategy,
    config: RequestConfig,
    status: ComponentStatus,
}

impl<C: HttpClient> HttpRequestComponent<C> {
    /// Create a component with default configuration and no TLS strategy.
    pub fn new(client: C) -> Self {
        Self {
            client,
            tls: TlsStrategy::None,
            config: RequestConfig::default(),
            status: ComponentStatus::default(),
        }
    }

    /// Select the TLS verification strategy.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsStrategy) -> Self {
        self.tls = tls;
        self
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.config.url = Some(url.into());
    }

    pub fn set_method(&mut self, method: Method) {
        self.config.method = method;
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.config.user_agent = Some(user_agent.into());
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.config.body = body.into();
    }

    pub fn set_headers(&mut self, headers: Vec<Header>) {
        self.config.headers = headers;
    }

    #[must_use]
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    #[must_use]
    pub fn has_warning(&self) -> bool {
        self.status.has_warning()
    }

    /// Perform one request with the current configuration.
    ///
    /// Never fails from the caller's point of view: the outcome is recorded
    /// in the warning status and logged. There is no retry.
    #[tracing::instrument(skip(self), fields(method = %self.config.method))]
    pub async fn send(&mut self) {
        let url = self.config.url.clone().unwrap_or_default();
        match self.round_trip().await {
            Ok(code) => {
                self.status.clear_warning();
                tracing::debug!(%url, code, "HTTP Request completed");
            }
            Err(err) => {
                self.status.set_warning();
                match &err {
                    RequestError::Transport(transport) => {
                        tracing::warn!(%url, error = %transport, "HTTP Request failed");
                    }
                    RequestError::Status(code) => {
                        tracing::warn!(%url, code, "HTTP Request failed");
                    }
                    RequestError::Begin | RequestError::MissingUrl => {
                        tracing::warn!(%url, "{err}");
                    }
                }
            }
        }
    }

    async fn round_trip(&mut self) -> Result<u16, RequestError> {
        let Some(url) = self.config.url.as_deref() else {
            return Err(RequestError::MissingUrl);
        };

        if !self.client.begin(url, &self.tls) {
            self.client.end();
            return Err(RequestError::Begin);
        }

        self.client.set_timeout(self.config.timeout);
        if let Some(user_agent) = &self.config.user_agent {
            self.client.set_user_agent(user_agent);
        }
        for header in &self.config.headers {
            self.client.add_header(header.name(), header.value());
        }

        let code = self
            .client
            .send_request(self.config.method, &self.config.body)
            .await;
        self.client.end();

        response::classify(code)
    }
}

impl<C: HttpClient> Component for HttpRequestComponent<C> {
    fn name(&self) -> &'static str {
        "http_request"
    }

    fn setup(&mut self) -> Result<(), HttpActionError> {
        self.client.prepare(&self.tls)
    }

    fn dump_config(&self) -> String {
        let mut out = String::from("HTTP Request:\n");
        let _ = writeln!(out, "  URL: {}", self.config.url.as_deref().unwrap_or("<unset>"));
        let _ = writeln!(out, "  Method: {}", self.config.method);
        let _ = writeln!(out, "  Timeout: {}ms", self.config.timeout.as_millis());
        match &self.tls {
            TlsStrategy::None => {}
            TlsStrategy::Fingerprint(_) => out.push_str("  Using SSL Fingerprint\n"),
            TlsStrategy::Certificate(_) => out.push_str("  Using CA Certificate\n"),
        }
        if let Some(user_agent) = &self.config.user_agent {
            let _ = writeln!(out, "  User-Agent: {user_agent}");
        }
        if !self.config.headers.is_empty() {
            out.push_str("  Headers:\n");
            for header in &self.config.headers {
                let _ = writeln!(out, "    {header}");
            }
        }
        out
    }

    fn setup_priority(&self) -> SetupPriority {
        SetupPriority::AFTER_WIFI
    }

    fn status(&self) -> ComponentStatus {
        self.status
    }

    fn mark_failed(&mut self) {
        self.status.mark_failed();
    }
}
