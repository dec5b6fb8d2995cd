//! Request configuration held by the request component.

use std::time::Duration;

use crate::header::Header;
use crate::method::Method;

/// Timeout applied when none has been configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Everything needed to issue one request.
///
/// Written field by field right before each send; there is no versioning,
/// the last writer wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub url: Option<String>,
    pub method: Method,
    pub user_agent: Option<String>,
    pub timeout: Duration,
    pub body: String,
    pub headers: Vec<Header>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            url: None,
            method: Method::Get,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            body: String::new(),
            headers: Vec::new(),
        }
    }
}
