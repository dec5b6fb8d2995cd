//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `httpaction.toml` in the working directory, or the file named by
//! `HTTPACTION_CONFIG`. Every field has a sensible default so the file is
//! optional; without automations the daemon simply idles. Environment
//! variables take precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

use httpaction_domain::endpoint::validate_url;
use httpaction_domain::method::Method;
use httpaction_domain::request::DEFAULT_TIMEOUT;
use httpaction_domain::trigger::{Trigger, is_template};

const DEFAULT_PATH: &str = "httpaction.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Defaults for the shared HTTP request component.
    pub http_request: HttpRequestConfig,
    /// Trigger → actions rules.
    pub automations: Vec<AutomationConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// HTTP request component configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpRequestConfig {
    /// `User-Agent` sent unless an action overrides it.
    pub useragent: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// SHA-1 certificate fingerprint to pin.
    pub fingerprint: Option<String>,
    /// PEM file with an extra trusted root certificate.
    pub ca_certificate_path: Option<PathBuf>,
}

/// One automation: a trigger and the actions it plays.
#[derive(Debug, Deserialize)]
pub struct AutomationConfig {
    pub name: String,
    pub trigger: Trigger,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

/// An HTTP action. `get` and `post` fix the method; `send` takes it from
/// the `method` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionConfig {
    Get(RequestActionConfig),
    Post(RequestActionConfig),
    Send(SendActionConfig),
}

/// Fields shared by every action verb. String fields may contain
/// `{{ trigger }}`, `{{ sequence }}`, `{{ fired_at }}` or `{{ id }}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestActionConfig {
    pub url: String,
    pub body: Option<String>,
    pub useragent: Option<String>,
    pub timeout_ms: Option<u64>,
    pub headers: Vec<HeaderConfig>,
    pub header_retention: HeaderRetentionConfig,
}

/// `send` action: the common fields plus a method, which is required.
#[derive(Debug, Deserialize)]
pub struct SendActionConfig {
    pub method: Method,
    #[serde(flatten)]
    pub request: RequestActionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeaderConfig {
    pub name: String,
    pub value: String,
}

/// What an action without headers does to headers left by a previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRetentionConfig {
    #[default]
    Sticky,
    Replace,
}

impl ActionConfig {
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Get(_) => Method::Get,
            Self::Post(_) => Method::Post,
            Self::Send(send) => send.method,
        }
    }

    #[must_use]
    pub fn request(&self) -> &RequestActionConfig {
        match self {
            Self::Get(request) | Self::Post(request) => request,
            Self::Send(send) => &send.request,
        }
    }
}

impl Config {
    /// Load configuration from `httpaction.toml` (or `$HTTPACTION_CONFIG`)
    /// if present, then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed or fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("HTTPACTION_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HTTPACTION_USERAGENT") {
            self.http_request.useragent = Some(val);
        }
        if let Ok(val) = std::env::var("HTTPACTION_TIMEOUT_MS") {
            if let Ok(timeout_ms) = val.parse() {
                self.http_request.timeout_ms = timeout_ms;
            }
        }
        if let Ok(val) = std::env::var("HTTPACTION_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Check everything that can be checked before the first trigger fires.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tls = &self.http_request;
        if tls.fingerprint.is_some() && tls.ca_certificate_path.is_some() {
            return Err(ConfigError::Validation(
                "fingerprint and ca_certificate_path are mutually exclusive".to_string(),
            ));
        }
        for automation in &self.automations {
            automation.validate()?;
        }
        Ok(())
    }
}

impl AutomationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |msg: String| ConfigError::Validation(format!("automation '{}': {msg}", self.name));

        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "automation name must not be empty".to_string(),
            ));
        }
        if self.trigger == (Trigger::Interval { seconds: 0 }) {
            return Err(invalid("interval seconds must be non-zero".to_string()));
        }
        for action in &self.actions {
            let request = action.request();
            if !is_template(&request.url) {
                validate_url(&request.url).map_err(|err| invalid(err.to_string()))?;
            }
            if matches!(action, ActionConfig::Get(_)) && request.body.is_some() {
                return Err(invalid("get actions cannot carry a body".to_string()));
            }
            if request.headers.iter().any(|h| h.name.trim().is_empty()) {
                return Err(invalid("header name must not be empty".to_string()));
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "httpactiond=info,httpaction=info".to_string(),
        }
    }
}

impl Default for HttpRequestConfig {
    fn default() -> Self {
        Self {
            useragent: Some(concat!("httpactiond/", env!("CARGO_PKG_VERSION")).to_string()),
            timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(5000),
            fingerprint: None,
            ca_certificate_path: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.http_request.timeout_ms, 5000);
        assert!(
            config
                .http_request
                .useragent
                .as_deref()
                .is_some_and(|ua| ua.starts_with("httpactiond/"))
        );
        assert!(config.http_request.fingerprint.is_none());
        assert!(config.automations.is_empty());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.http_request.timeout_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = r#"
            [logging]
            filter = 'debug'

            [http_request]
            useragent = 'tester/1.0'
            timeout_ms = 1500

            [[automations]]
            name = 'boot'
            trigger = { type = 'startup' }

            [[automations.actions]]
            type = 'get'
            url = 'http://example.com/boot'

            [[automations]]
            name = 'heartbeat'
            trigger = { type = 'interval', seconds = 30 }

            [[automations.actions]]
            type = 'post'
            url = 'http://example.com/beat'
            body = '{"n": {{ sequence }}}'
            header_retention = 'replace'
            headers = [
                { name = 'Content-Type', value = 'application/json' },
                { name = 'X-Tag', value = 'a' },
                { name = 'X-Tag', value = 'b' },
            ]

            [[automations.actions]]
            type = 'send'
            method = 'PUT'
            url = 'http://example.com/{{ trigger }}'
            timeout_ms = 250
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.http_request.useragent.as_deref(), Some("tester/1.0"));
        assert_eq!(config.http_request.timeout_ms, 1500);
        assert_eq!(config.automations.len(), 2);
        assert_eq!(config.automations[0].trigger, Trigger::Startup);
        assert_eq!(
            config.automations[1].trigger,
            Trigger::Interval { seconds: 30 }
        );

        let actions = &config.automations[1].actions;
        assert_eq!(actions[0].method(), Method::Post);
        assert_eq!(actions[0].request().headers.len(), 3);
        assert_eq!(
            actions[0].request().header_retention,
            HeaderRetentionConfig::Replace
        );
        assert_eq!(actions[1].method(), Method::Put);
        assert_eq!(actions[1].request().timeout_ms, Some(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_require_method_on_send_action() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'shutdown' }
            actions = [{ type = 'send', url = 'http://example.com/', body = 'x' }]
        ";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn should_read_method_of_send_action() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'shutdown' }
            actions = [{ type = 'send', method = 'PATCH', url = 'http://example.com/', body = 'x' }]
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.automations[0].actions[0].method(), Method::Patch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.http_request.timeout_ms, 5000);
    }

    #[test]
    fn should_reject_unknown_action_type() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'startup' }
            actions = [{ type = 'fetch', url = 'http://example.com/' }]
        ";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn should_reject_invalid_static_url() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'startup' }
            actions = [{ type = 'get', url = 'ftp://example.com/' }]
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_accept_templated_url_without_checking_it() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'startup' }
            actions = [{ type = 'get', url = '{{ id }}' }]
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_body_on_get() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'startup' }
            actions = [{ type = 'get', url = 'http://example.com/', body = 'x' }]
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_interval() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'interval', seconds = 0 }
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_blank_header_name() {
        let toml = "
            [[automations]]
            name = 'a'
            trigger = { type = 'startup' }
            actions = [{ type = 'get', url = 'http://example.com/', headers = [{ name = ' ', value = 'x' }] }]
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_both_tls_options() {
        let mut config = Config::default();
        config.http_request.fingerprint = Some("AA".to_string());
        config.http_request.ca_certificate_path = Some(PathBuf::from("ca.pem"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
