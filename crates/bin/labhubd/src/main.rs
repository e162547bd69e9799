//! # labhubd: labhub daemon
//!
//! Composition root that wires the instrument panel, callback registry,
//! event bus, and automation scheduler together.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing
//! - Register instrument adapters on the panel
//! - Register the host callbacks scripts may `call`
//! - Load and run the configured automation script
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use labhub_adapter_virtual::{EmulatedLink, IotRelay, MassFlowController, Thermocouple};
use labhub_app::callbacks::CallbackRegistry;
use labhub_app::event_bus::InProcessEventBus;
use labhub_app::panel::InstrumentPanel;
use labhub_app::ports::SystemClock;
use labhub_app::scheduler::{driver, AutomationScheduler};

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Instruments
    let mut panel = InstrumentPanel::new();
    if config.instruments.virtual_enabled {
        let mut thermocouple = Thermocouple::new("Reactor Thermocouple", "reactor_tc");
        thermocouple.record_reading(21.5)?;
        panel.register(Box::new(MassFlowController::new(
            "Methane Mass Flow Controller",
            "ch4_mfc",
            500.0,
        )))?;
        panel.register(Box::new(thermocouple))?;
        panel.register(Box::new(IotRelay::new("Heater Relay", "heater_relay")))?;
    }
    tracing::info!(instruments = ?panel.nicknames(), "instrument panel ready");

    // Host callbacks available to scripts
    let mut callbacks = CallbackRegistry::new();
    callbacks.register_with_panel("log_flow", |panel| {
        let mfc = panel
            .resolve("ch4_mfc")
            .ok_or_else(|| anyhow::anyhow!("no mass-flow controller registered"))?;
        let flow = mfc.get_field("Flow rate (sccm)")?;
        tracing::info!(%flow, "flow check");
        Ok(())
    });

    // Event feed for the display layer
    let bus = InProcessEventBus::new(256);
    let mut feed = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = feed.recv().await {
            tracing::info!(kind = %event.kind, data = %event.data, "automation event");
        }
    });

    // The emulated transport stands in for the operator opening serial.
    let link = Arc::new(EmulatedLink::new());
    link.open();

    let mut scheduler = AutomationScheduler::new(
        SystemClock,
        Arc::clone(&link),
        bus.clone(),
        panel,
        callbacks,
    );

    let Some(path) = config.automation.script.clone() else {
        tracing::info!("no automation script configured; nothing to run");
        return Ok(());
    };

    let source = std::fs::read_to_string(&path)?;
    let name = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned());

    scheduler.load(&name, &source)?;
    scheduler.start()?;
    driver::drive(&mut scheduler, config.poll_interval()).await;

    let status = scheduler.status();
    tracing::info!(
        mode = %status.mode,
        progress = %status.progress(),
        "automation run ended"
    );
    Ok(())
}
