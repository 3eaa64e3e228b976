//! Headless skirmish client.
//!
//! Loads content, plays one match with the autopilot standing in for the
//! player, streams events to the log and prints a JSON summary on stdout.
//!
//! ```bash
//! EMBERS_SEED=7 RUST_LOG=embers_runtime=debug cargo run -p embers-client
//! ```
mod autopilot;
mod config;
mod logging;

use anyhow::Result;
use embers_content::ContentFactory;
use embers_runtime::{Event, EventBus, Runtime, RuntimeConfig, Topic, scenario};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::autopilot::Autopilot;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::init(config.log_dir.as_deref())?;

    tracing::info!("Starting skirmish '{}'", config.scenario);
    tracing::debug!(?config, "client configuration");

    let factory = ContentFactory::new(&config.data_dir);
    let (oracles, spec) = scenario::load(&factory, &config.scenario)?;
    let autopilot = Autopilot::new(oracles.recipes().clone());

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            seed: config.seed,
            ..RuntimeConfig::default()
        })
        .oracles(oracles)
        .scenario(spec)
        .player_provider(autopilot)
        .build()?;

    let loggers = spawn_event_loggers(&runtime.events());

    runtime.run(config.max_turns).await?;

    // Let the loggers drain what is still buffered.
    tokio::task::yield_now().await;
    for logger in loggers {
        logger.abort();
    }

    let summary = runtime.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// One task per topic, each writing what it receives to the log.
fn spawn_event_loggers(bus: &EventBus) -> Vec<JoinHandle<()>> {
    bus.subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, mut rx)| {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(Event::Notice(notice)) => tracing::info!(?topic, ?notice, "notice"),
                        Ok(Event::Game(event)) => tracing::debug!(?topic, ?event, "event"),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(?topic, skipped, "event logger lagged")
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}
