use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use httpaction_adapter_http_reqwest::ReqwestHttpClient;
use httpaction_app::automation_engine::AutomationEngine;
use httpaction_app::component::{ComponentRegistry, shared};
use httpaction_app::trigger_bus::InProcessTriggerBus;
use httpaction_app::trigger_scheduler::TriggerScheduler;
use httpaction_domain::trigger::Trigger;
use httpactiond::config::Config;
use httpactiond::wiring;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Components
    let http_request = shared(wiring::build_component(
        ReqwestHttpClient::new()?,
        &config.http_request,
    )?);
    let mut registry = ComponentRegistry::new();
    registry.register(&http_request);

    let failed = registry.setup_all().await;
    if !failed.is_empty() {
        tracing::error!(?failed, "some components failed to set up");
    }
    registry.dump_config().await;

    // Automations
    let engine = Arc::new(AutomationEngine::new(wiring::build_automations(
        &http_request,
        &config.automations,
    )?));

    let bus = InProcessTriggerBus::default();
    let receiver = bus.subscribe();
    let runner = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.run(receiver).await }
    });

    let mut scheduler = TriggerScheduler::new(bus.clone());
    scheduler.fire(Trigger::Startup).await?;
    scheduler.start_intervals(engine.triggers());
    tracing::info!(
        automations = config.automations.len(),
        "httpactiond running, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    scheduler.stop();
    scheduler.fire(Trigger::Shutdown).await?;

    // The engine drains the bus and returns once every sender is gone.
    drop(scheduler);
    drop(bus);
    runner.await?;

    Ok(())
}
