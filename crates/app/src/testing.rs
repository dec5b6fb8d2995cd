//! Scripted [`HttpClient`] used by the unit tests of this crate.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use httpaction_domain::method::Method;
use httpaction_domain::tls::TlsStrategy;

use crate::ports::HttpClient;

/// One call observed on the client port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Begin { url: String, tls: &'static str },
    SetTimeout(Duration),
    SetUserAgent(String),
    AddHeader(String, String),
    Send { method: Method, body: String },
    End,
}

/// Records every call and answers `send_request` from a script.
///
/// Clones share the same call log, so a test can keep one clone while the
/// other is owned by the component.
#[derive(Clone, Default)]
pub struct SpyClient {
    calls: Arc<Mutex<Vec<Call>>>,
    responses: Arc<Mutex<VecDeque<i32>>>,
    refuse_begin: bool,
}

impl SpyClient {
    pub fn responding(codes: impl IntoIterator<Item = i32>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(codes.into_iter().collect())),
            ..Self::default()
        }
    }

    pub fn refusing_begin() -> Self {
        Self {
            refuse_begin: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Send { .. }))
            .collect()
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddHeader(name, value) => Some((name, value)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl HttpClient for SpyClient {
    fn begin(&mut self, url: &str, tls: &TlsStrategy) -> bool {
        self.record(Call::Begin {
            url: url.to_string(),
            tls: tls.label(),
        });
        !self.refuse_begin
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.record(Call::SetTimeout(timeout));
    }

    fn set_user_agent(&mut self, user_agent: &str) {
        self.record(Call::SetUserAgent(user_agent.to_string()));
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.record(Call::AddHeader(name.to_string(), value.to_string()));
    }

    fn send_request(&mut self, method: Method, body: &str) -> impl Future<Output = i32> + Send {
        self.record(Call::Send {
            method,
            body: body.to_string(),
        });
        let code = self.responses.lock().unwrap().pop_front().unwrap_or(200);
        async move { code }
    }

    fn end(&mut self) {
        self.record(Call::End);
    }
}

/// In-memory sink for formatted tracing output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Route events emitted on this thread into the buffer, down to `DEBUG`,
    /// until the guard is dropped.
    pub fn capture(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
