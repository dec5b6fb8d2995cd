//! Component lifecycle — the capability set the host drives on every
//! component, and the registry that drives it.

use std::sync::Arc;

use tokio::sync::Mutex;

use httpaction_domain::error::HttpActionError;
use httpaction_domain::status::ComponentStatus;

/// A component shared between the registry and the actions that drive it.
pub type SharedComponent<T> = Arc<Mutex<T>>;

/// Wrap a component so it can be registered and handed to actions.
pub fn shared<T>(component: T) -> SharedComponent<T> {
    Arc::new(Mutex::new(component))
}

/// Order in which components are set up; higher runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetupPriority(pub i32);

impl SetupPriority {
    /// Communication buses.
    pub const BUS: Self = Self(1000);
    /// Plain IO pins and expanders.
    pub const IO: Self = Self(900);
    /// Hardware drivers.
    pub const HARDWARE: Self = Self(800);
    /// Data producers such as sensors.
    pub const DATA: Self = Self(600);
    /// Consumers of sensor data.
    pub const PROCESSOR: Self = Self(400);
    /// Network connectivity itself.
    pub const WIFI: Self = Self(250);
    /// Needs network connectivity to be up.
    pub const AFTER_WIFI: Self = Self(200);
    /// Needs an established upstream connection.
    pub const AFTER_CONNECTION: Self = Self(100);
    /// Runs after everything else has been set up.
    pub const LATE: Self = Self(-100);
}

/// Lifecycle hooks the host calls on every registered component.
pub trait Component: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// One-time initialisation.
    ///
    /// # Errors
    ///
    /// An error marks the component as failed; the host keeps running.
    fn setup(&mut self) -> Result<(), HttpActionError> {
        Ok(())
    }

    /// Human-readable description of the current configuration.
    fn dump_config(&self) -> String;

    fn setup_priority(&self) -> SetupPriority {
        SetupPriority::DATA
    }

    fn status(&self) -> ComponentStatus;

    /// Record that [`setup`](Self::setup) failed.
    fn mark_failed(&mut self);
}

/// Holds every component of the running application.
#[derive(Default)]
pub struct ComponentRegistry {
    components: Vec<Arc<Mutex<dyn Component>>>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component. Registration order breaks priority ties.
    pub fn register<T: Component + 'static>(&mut self, component: &SharedComponent<T>) {
        let component: Arc<Mutex<dyn Component>> = component.clone();
        self.components.push(component);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Run `setup` on every component, highest priority first.
    ///
    /// A failing component is marked failed and logged; the remaining
    /// components are still set up. Returns the names of failed components.
    pub async fn setup_all(&self) -> Vec<&'static str> {
        let mut ordered = Vec::with_capacity(self.components.len());
        for component in &self.components {
            let priority = component.lock().await.setup_priority();
            ordered.push((priority, Arc::clone(component)));
        }
        ordered.sort_by(|a, b| b.0.cmp(&a.0));

        let mut failed = Vec::new();
        for (priority, component) in ordered {
            let mut component = component.lock().await;
            let name = component.name();
            match component.setup() {
                Ok(()) => tracing::debug!(component = name, priority = priority.0, "component set up"),
                Err(err) => {
                    tracing::error!(component = name, error = %err, "component setup failed");
                    component.mark_failed();
                    failed.push(name);
                }
            }
        }
        failed
    }

    /// Log the configuration dump of every component.
    pub async fn dump_config(&self) {
        for component in &self.components {
            let component = component.lock().await;
            let name = component.name();
            for line in component.dump_config().lines() {
                tracing::info!(component = name, "{line}");
            }
        }
    }
}
