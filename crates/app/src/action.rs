//! Actions — units of work an automation plays when its trigger fires.

use std::future::Future;
use std::time::Duration;

use httpaction_domain::error::ValidationError;
use httpaction_domain::header::Header;
use httpaction_domain::method::Method;
use httpaction_domain::template::Templatable;

use crate::component::SharedComponent;
use crate::http_request::HttpRequestComponent;
use crate::ports::HttpClient;

/// Something an automation can run with the trigger context `Ctx`.
pub trait Action<Ctx>: Send + Sync {
    fn play(&self, ctx: &Ctx) -> impl Future<Output = ()> + Send;
}

/// What `play` does with the component's headers when the action itself
/// configures none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderRetention {
    /// Leave the component's current headers alone. A previous action's
    /// headers are therefore sent again.
    #[default]
    Sticky,
    /// Always install this action's header list, clearing old headers when
    /// it is empty.
    Replace,
}

/// Resolves templated request values against the trigger context, writes
/// them into an [`HttpRequestComponent`] and sends.
///
/// URL and method are always written. Body, user-agent and timeout are only
/// written when configured here; otherwise the component keeps whatever the
/// previous action (or its defaults) left in place.
pub struct HttpRequestSendAction<C, Ctx> {
    parent: SharedComponent<HttpRequestComponent<C>>,
    url: Templatable<String, Ctx>,
    method: Templatable<Method, Ctx>,
    body: Option<Templatable<String, Ctx>>,
    user_agent: Option<Templatable<String, Ctx>>,
    timeout: Option<Templatable<Duration, Ctx>>,
    headers: Vec<Header>,
    header_retention: HeaderRetention,
}

impl<C: HttpClient, Ctx> HttpRequestSendAction<C, Ctx> {
    pub fn new(
        parent: SharedComponent<HttpRequestComponent<C>>,
        url: impl Into<Templatable<String, Ctx>>,
        method: impl Into<Templatable<Method, Ctx>>,
    ) -> Self {
        Self {
            parent,
            url: url.into(),
            method: method.into(),
            body: None,
            user_agent: None,
            timeout: None,
            headers: Vec::new(),
            header_retention: HeaderRetention::default(),
        }
    }

    /// A `GET` request to `url`.
    pub fn get(
        parent: SharedComponent<HttpRequestComponent<C>>,
        url: impl Into<Templatable<String, Ctx>>,
    ) -> Self {
        Self::new(parent, url, Method::Get)
    }

    /// A `POST` request to `url`; pair with [`set_body`](Self::set_body).
    pub fn post(
        parent: SharedComponent<HttpRequestComponent<C>>,
        url: impl Into<Templatable<String, Ctx>>,
    ) -> Self {
        Self::new(parent, url, Method::Post)
    }

    pub fn set_url(&mut self, url: impl Into<Templatable<String, Ctx>>) {
        self.url = url.into();
    }

    pub fn set_method(&mut self, method: impl Into<Templatable<Method, Ctx>>) {
        self.method = method.into();
    }

    pub fn set_body(&mut self, body: impl Into<Templatable<String, Ctx>>) {
        self.body = Some(body.into());
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<Templatable<String, Ctx>>) {
        self.user_agent = Some(user_agent.into());
    }

    pub fn set_timeout(&mut self, timeout: impl Into<Templatable<Duration, Ctx>>) {
        self.timeout = Some(timeout.into());
    }

    /// Append a header; duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHeaderName`] for a blank name.
    pub fn add_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.headers.push(Header::new(name, value)?);
        Ok(())
    }

    pub fn set_header_retention(&mut self, retention: HeaderRetention) {
        self.header_retention = retention;
    }

    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }
}

impl<C, Ctx> Action<Ctx> for HttpRequestSendAction<C, Ctx>
where
    C: HttpClient,
    Ctx: Sync,
{
    async fn play(&self, ctx: &Ctx) {
        // Held until `send` returns so concurrent plays cannot interleave
        // their configuration.
        let mut parent = self.parent.lock().await;

        parent.set_url(self.url.value(ctx));
        parent.set_method(self.method.value(ctx));
        if let Some(body) = &self.body {
            parent.set_body(body.value(ctx));
        }
        if let Some(user_agent) = &self.user_agent {
            parent.set_user_agent(user_agent.value(ctx));
        }
        if let Some(timeout) = &self.timeout {
            parent.set_timeout(timeout.value(ctx));
        }
        match self.header_retention {
            HeaderRetention::Sticky if self.headers.is_empty() => {}
            HeaderRetention::Sticky | HeaderRetention::Replace => {
                parent.set_headers(self.headers.clone());
            }
        }

        parent.send().await;
    }
}
