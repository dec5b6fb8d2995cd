//! Fan-out of fired triggers to every running automation engine.
//!
//! Each engine holds its own [`broadcast::Receiver`]. A receiver that falls
//! more than the bus capacity behind loses the oldest events and sees
//! `RecvError::Lagged` on its next `recv`.

use std::future::Future;

use tokio::sync::broadcast;

use httpaction_domain::error::HttpActionError;
use httpaction_domain::trigger::TriggerEvent;

use crate::ports::TriggerPublisher;

/// Trigger events buffered per receiver before the slowest one lags.
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct InProcessTriggerBus {
    sender: broadcast::Sender<TriggerEvent>,
}

impl Default for InProcessTriggerBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl InProcessTriggerBus {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _unused) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Attach an engine. Triggers fired before this call are not replayed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TriggerEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl TriggerPublisher for InProcessTriggerBus {
    fn publish(
        &self,
        event: TriggerEvent,
    ) -> impl Future<Output = Result<(), HttpActionError>> + Send {
        match self.sender.send(event) {
            Ok(delivered) => tracing::trace!(delivered, "trigger published"),
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(trigger = %event.trigger, "no engine listening, trigger dropped");
            }
        }
        async { Ok(()) }
    }
}
