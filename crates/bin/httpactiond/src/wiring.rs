//! Turns the loaded configuration into a component and its automations.

use std::sync::Arc;
use std::time::Duration;

use httpaction_app::action::{HeaderRetention, HttpRequestSendAction};
use httpaction_app::automation_engine::Automation;
use httpaction_app::component::SharedComponent;
use httpaction_app::http_request::HttpRequestComponent;
use httpaction_app::ports::HttpClient;
use httpaction_domain::template::Templatable;
use httpaction_domain::tls::TlsStrategy;
use httpaction_domain::trigger::{TriggerEvent, is_template};

use crate::config::{
    ActionConfig, AutomationConfig, ConfigError, HeaderRetentionConfig, HttpRequestConfig,
};

/// The only action kind the daemon builds.
pub type RequestAction<C> = HttpRequestSendAction<C, TriggerEvent>;

/// Select the TLS strategy, reading the CA certificate if one is configured.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the certificate file cannot be read.
pub fn tls_strategy(config: &HttpRequestConfig) -> Result<TlsStrategy, ConfigError> {
    if let Some(fingerprint) = &config.fingerprint {
        return Ok(TlsStrategy::Fingerprint(fingerprint.clone()));
    }
    if let Some(path) = &config.ca_certificate_path {
        let pem = std::fs::read_to_string(path)?;
        return Ok(TlsStrategy::Certificate(pem));
    }
    Ok(TlsStrategy::None)
}

/// Build the HTTP request component with the configured defaults.
///
/// # Errors
///
/// See [`tls_strategy`].
pub fn build_component<C: HttpClient>(
    client: C,
    config: &HttpRequestConfig,
) -> Result<HttpRequestComponent<C>, ConfigError> {
    let mut component = HttpRequestComponent::new(client).with_tls(tls_strategy(config)?);
    component.set_timeout(Duration::from_millis(config.timeout_ms));
    if let Some(useragent) = &config.useragent {
        component.set_user_agent(useragent.clone());
    }
    Ok(component)
}

/// Build every configured automation, all driving `parent`.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] for an invalid header.
pub fn build_automations<C: HttpClient>(
    parent: &SharedComponent<HttpRequestComponent<C>>,
    automations: &[AutomationConfig],
) -> Result<Vec<Automation<RequestAction<C>>>, ConfigError> {
    let mut built = Vec::with_capacity(automations.len());
    for config in automations {
        let mut automation = Automation::new(&config.name, config.trigger);
        for action in &config.actions {
            let action = build_action(parent, action).map_err(|err| {
                ConfigError::Validation(format!("automation '{}': {err}", config.name))
            })?;
            automation = automation.action(action);
        }
        built.push(automation);
    }
    Ok(built)
}

fn build_action<C: HttpClient>(
    parent: &SharedComponent<HttpRequestComponent<C>>,
    config: &ActionConfig,
) -> Result<RequestAction<C>, httpaction_domain::error::ValidationError> {
    let request = config.request();
    let mut action =
        HttpRequestSendAction::new(Arc::clone(parent), templated(&request.url), config.method());

    if let Some(body) = &request.body {
        action.set_body(templated(body));
    }
    if let Some(useragent) = &request.useragent {
        action.set_user_agent(templated(useragent));
    }
    if let Some(timeout_ms) = request.timeout_ms {
        action.set_timeout(Duration::from_millis(timeout_ms));
    }
    for header in &request.headers {
        action.add_header(&header.name, &header.value)?;
    }
    action.set_header_retention(match request.header_retention {
        HeaderRetentionConfig::Sticky => HeaderRetention::Sticky,
        HeaderRetentionConfig::Replace => HeaderRetention::Replace,
    });
    Ok(action)
}

/// Strings with placeholders are rendered against each trigger event;
/// anything else is used as is.
fn templated(value: &str) -> Templatable<String, TriggerEvent> {
    if is_template(value) {
        let template = value.to_string();
        Templatable::from_fn(move |event: &TriggerEvent| event.render(&template))
    } else {
        Templatable::Static(value.to_string())
    }
}
