//! Bot wiring: logging, relay-config load, gateway construction, event loop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::info;

use crate::commands::CommandInterpreter;
use crate::config::{BotConfig, RelayConfig};
use crate::core::{init_tracing, ChatGateway};
use crate::router::Router;
use crate::slack::{run_events, SlackGateway};

/// Builds a router over the given gateway and shared relay config. Split out
/// so tests can inject a mock gateway and drive the router with fake events.
pub fn build_router(
    config: Arc<RwLock<RelayConfig>>,
    gateway: Arc<dyn ChatGateway>,
    config_path: impl Into<PathBuf>,
) -> Router {
    let interpreter =
        CommandInterpreter::new(Arc::clone(&config), Arc::clone(&gateway), config_path);
    Router::new(config, gateway, interpreter)
}

/// Main entry: init logging, load the relay config (fatal when missing or
/// malformed), propagate the debug flag to the gateway, then consume the
/// event stream until a fatal error.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    if let Some(dir) = Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(dir)?;
    }
    init_tracing(&config.log_file)?;

    let relay =
        RelayConfig::load(&config.config_file).context("Failed to load configuration")?;

    let gateway = Arc::new(SlackGateway::new(config.slack_token.clone()));
    gateway.set_verbose(relay.debug);

    info!(
        config_file = %config.config_file,
        triggers = relay.notifiers.len(),
        debug = relay.debug,
        "Initializing bot"
    );

    let shared = Arc::new(RwLock::new(relay));
    let router = Arc::new(build_router(
        shared,
        Arc::clone(&gateway) as Arc<dyn ChatGateway>,
        &config.config_file,
    ));

    info!("Bot started successfully");

    run_events(gateway, router).await
}
