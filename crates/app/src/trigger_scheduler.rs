//! Trigger scheduler — turns configured triggers into published events.

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use httpaction_domain::error::HttpActionError;
use httpaction_domain::trigger::{Trigger, TriggerEvent};

use crate::ports::TriggerPublisher;

/// Publishes one-shot triggers on demand and runs a ticker task per
/// interval trigger.
pub struct TriggerScheduler<P> {
    publisher: P,
    fired: HashMap<Trigger, u64>,
    tickers: Vec<JoinHandle<()>>,
}

impl<P> TriggerScheduler<P>
where
    P: TriggerPublisher + Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            fired: HashMap::new(),
            tickers: Vec::new(),
        }
    }

    /// Publish a one-shot trigger such as [`Trigger::Startup`].
    ///
    /// # Errors
    ///
    /// Propagates the publisher's error.
    pub async fn fire(&mut self, trigger: Trigger) -> Result<TriggerEvent, HttpActionError> {
        let sequence = self.fired.entry(trigger).or_insert(0);
        let event = TriggerEvent::new(trigger, *sequence);
        *sequence += 1;
        self.publisher.publish(event.clone()).await?;
        Ok(event)
    }

    /// Spawn a ticker for every [`Trigger::Interval`] in `triggers`.
    ///
    /// The first event is published one full period after this call.
    /// Other trigger kinds and zero-second intervals are ignored.
    pub fn start_intervals(&mut self, triggers: impl IntoIterator<Item = Trigger>) {
        for trigger in triggers {
            let Trigger::Interval { seconds } = trigger else {
                continue;
            };
            if seconds == 0 {
                tracing::warn!(%trigger, "ignoring interval trigger with zero period");
                continue;
            }

            let publisher = self.publisher.clone();
            let period = Duration::from_secs(seconds);
            let handle = tokio::spawn(async move {
                let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                let mut sequence = 0;
                loop {
                    ticker.tick().await;
                    let event = TriggerEvent::new(trigger, sequence);
                    sequence += 1;
                    if let Err(err) = publisher.publish(event).await {
                        tracing::warn!(%trigger, error = %err, "failed to publish trigger event");
                    }
                }
            });
            tracing::debug!(%trigger, "interval trigger started");
            self.tickers.push(handle);
        }
    }

    /// Stop every ticker task.
    pub fn stop(&mut self) {
        for handle in self.tickers.drain(..) {
            handle.abort();
        }
    }
}

impl<P> Drop for TriggerScheduler<P> {
    fn drop(&mut self) {
        for handle in &self.tickers {
            handle.abort();
        }
    }
}
