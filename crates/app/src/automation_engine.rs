//! Automation engine — reacts to trigger events by playing actions.
//!
//! The engine subscribes to the trigger bus and, for each incoming event,
//! checks every automation. When its trigger matches, the automation's
//! actions are played in order with the event as their context.

use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use httpaction_domain::trigger::{Trigger, TriggerEvent};

use crate::action::Action;

/// A named rule: when `trigger` fires, play `actions` in order.
pub struct Automation<A> {
    pub name: String,
    pub trigger: Trigger,
    pub actions: Vec<A>,
}

impl<A> Automation<A> {
    #[must_use]
    pub fn new(name: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            name: name.into(),
            trigger,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }
}

/// Reactive automation engine fed by trigger events.
pub struct AutomationEngine<A> {
    automations: Vec<Automation<A>>,
}

impl<A: Action<TriggerEvent>> AutomationEngine<A> {
    /// Create a new engine.
    #[must_use]
    pub fn new(automations: Vec<Automation<A>>) -> Self {
        Self { automations }
    }

    /// Every distinct trigger used by at least one automation.
    #[must_use]
    pub fn triggers(&self) -> Vec<Trigger> {
        let mut triggers: Vec<Trigger> = Vec::new();
        for automation in &self.automations {
            if !triggers.contains(&automation.trigger) {
                triggers.push(automation.trigger);
            }
        }
        triggers
    }

    /// Process a single event against all automations.
    ///
    /// Returns the names of the automations that ran.
    pub async fn process_event(&self, event: &TriggerEvent) -> Vec<&str> {
        let mut triggered = Vec::new();

        for automation in &self.automations {
            if !automation.trigger.matches_event(event) {
                continue;
            }

            tracing::debug!(
                automation = %automation.name,
                trigger = %event.trigger,
                sequence = event.sequence,
                "automation triggered"
            );
            for action in &automation.actions {
                action.play(event).await;
            }

            triggered.push(automation.name.as_str());
        }

        triggered
    }

    /// Consume events until the bus is closed.
    ///
    /// Events are processed one at a time; a lagging receiver skips the
    /// events it missed and logs how many.
    pub async fn run(&self, receiver: broadcast::Receiver<TriggerEvent>) {
        let mut events = BroadcastStream::new(receiver);
        while let Some(item) = events.next().await {
            match item {
                Ok(event) => {
                    self.process_event(&event).await;
                }
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "automation engine lagging, trigger events dropped");
                }
            }
        }
        tracing::debug!("trigger bus closed, automation engine stopped");
    }
}
