//! Triggers and the context they hand to actions when they fire.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EventId;

/// Describes when an automation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Fires once, after every component has been set up.
    Startup,
    /// Fires every `seconds` seconds.
    Interval { seconds: u64 },
    /// Fires once on graceful shutdown.
    Shutdown,
}

impl Trigger {
    /// Check whether this trigger is the one that produced `event`.
    #[must_use]
    pub fn matches_event(&self, event: &TriggerEvent) -> bool {
        *self == event.trigger
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Startup => f.write_str("startup"),
            Self::Interval { seconds } => write!(f, "interval({seconds}s)"),
            Self::Shutdown => f.write_str("shutdown"),
        }
    }
}

/// Context published when a trigger fires; actions resolve their templated
/// values against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub id: EventId,
    pub trigger: Trigger,
    /// How many times this trigger has fired before, starting at 0.
    pub sequence: u64,
    pub fired_at: DateTime<Utc>,
}

impl TriggerEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(trigger: Trigger, sequence: u64) -> Self {
        Self {
            id: EventId::new(),
            trigger,
            sequence,
            fired_at: Utc::now(),
        }
    }

    /// Substitute `{{ trigger }}`, `{{ sequence }}`, `{{ fired_at }}` and
    /// `{{ id }}` in `template`. Unknown placeholders are kept verbatim.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            let Some(len) = rest[start + 2..].find("}}") else {
                break;
            };
            let end = start + 2 + len + 2;
            out.push_str(&rest[..start]);

            let key = rest[start + 2..end - 2].trim();
            match key {
                "trigger" => out.push_str(&self.trigger.to_string()),
                "sequence" => out.push_str(&self.sequence.to_string()),
                "fired_at" => out.push_str(&self.fired_at.to_rfc3339()),
                "id" => out.push_str(&self.id.to_string()),
                _ => out.push_str(&rest[start..end]),
            }
            rest = &rest[end..];
        }

        out.push_str(rest);
        out
    }
}

/// Whether `template` contains anything [`TriggerEvent::render`] would touch.
#[must_use]
pub fn is_template(value: &str) -> bool {
    value
        .find("{{")
        .is_some_and(|start| value[start..].contains("}}"))
}
