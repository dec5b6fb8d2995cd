//! Trigger bus port — publish trigger events to the automation engine.

use std::future::Future;

use httpaction_domain::error::HttpActionError;
use httpaction_domain::trigger::TriggerEvent;

/// Publishes trigger events to interested subscribers.
pub trait TriggerPublisher {
    /// Publish an event to all current subscribers.
    fn publish(
        &self,
        event: TriggerEvent,
    ) -> impl Future<Output = Result<(), HttpActionError>> + Send;
}

impl<T: TriggerPublisher + Send + Sync> TriggerPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: TriggerEvent,
    ) -> impl Future<Output = Result<(), HttpActionError>> + Send {
        (**self).publish(event)
    }
}
