//! Command interpreter for direct-message administration.
//!
//! `list` is open to everyone; `set`, `del`, `debug` and `save` require the
//! configured admin. Malformed or unknown commands are dropped silently.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::RelayConfig;
use crate::core::{ChatGateway, CommandOutcome, MessageEvent, Result};
use crate::mention::{parse_receivers, uids_as_links};

const HELP_REPLY: &str =
    "I currently only understand `list` that lists all notification groups..";

/// Interprets direct-message commands against the shared relay config.
pub struct CommandInterpreter {
    config: Arc<RwLock<RelayConfig>>,
    gateway: Arc<dyn ChatGateway>,
    config_path: PathBuf,
}

impl CommandInterpreter {
    /// Creates an interpreter; `config_path` is where `save` persists to.
    pub fn new(
        config: Arc<RwLock<RelayConfig>>,
        gateway: Arc<dyn ChatGateway>,
        config_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            gateway,
            config_path: config_path.into(),
        }
    }

    /// Interprets one direct-message event.
    #[instrument(skip(self, event))]
    pub async fn interpret(&self, event: &MessageEvent) -> Result<CommandOutcome> {
        if event.text == "list" {
            return self.list(event).await;
        }

        if event.user_id != self.config.read().await.admin {
            self.gateway.reply_in_private(event, HELP_REPLY).await;
            return Ok(CommandOutcome::HelpSent);
        }

        match event.text.as_str() {
            "debug" => return self.toggle_debug(event).await,
            "save" => return self.save(event).await,
            _ => {}
        }

        let fields: Vec<&str> = event.text.split_whitespace().collect();
        match fields.first().copied() {
            Some("set") => self.set(event, &fields).await,
            Some("del") => self.del(event, &fields).await,
            _ => Ok(CommandOutcome::Ignored),
        }
    }

    /// `list`: one reply per configured trigger, in deterministic order.
    async fn list(&self, event: &MessageEvent) -> Result<CommandOutcome> {
        let cfg = self.config.read().await;
        for (trigger, receivers) in &cfg.notifiers {
            let line = format!("@{} => {}", trigger, uids_as_links(receivers).join(", "));
            self.gateway.reply_in_private(event, &line).await;
        }
        Ok(CommandOutcome::Listed(cfg.notifiers.len()))
    }

    /// `set <trigger> <mention>...`: overwrites the trigger's recipient list.
    /// Fewer than 3 fields is a silent no-op; malformed mentions are dropped.
    async fn set(&self, event: &MessageEvent, fields: &[&str]) -> Result<CommandOutcome> {
        if fields.len() < 3 {
            return Ok(CommandOutcome::Ignored);
        }
        let trigger = fields[1].to_string();
        let receivers = parse_receivers(fields[2..].iter().copied());

        self.config
            .write()
            .await
            .notifiers
            .insert(trigger.clone(), receivers.clone());

        info!(trigger = %trigger, receivers = ?receivers, "Trigger updated");

        let reply = format!(
            "New trigger word: {}\nReceivers: {}",
            trigger,
            uids_as_links(&receivers).join(", ")
        );
        self.gateway.reply_in_private(event, &reply).await;

        Ok(CommandOutcome::Set { trigger, receivers })
    }

    /// `del <trigger>`: unconditional removal, acked with a reaction. Absent
    /// triggers ack the same way; any other field count is a silent no-op.
    async fn del(&self, event: &MessageEvent, fields: &[&str]) -> Result<CommandOutcome> {
        if fields.len() != 2 {
            return Ok(CommandOutcome::Ignored);
        }
        let trigger = fields[1].to_string();

        self.config.write().await.notifiers.remove(&trigger);
        info!(trigger = %trigger, "Trigger removed");

        self.gateway.react(event, "white_check_mark").await;
        Ok(CommandOutcome::Deleted(trigger))
    }

    /// `debug`: toggles the flag and propagates it to the gateway.
    async fn toggle_debug(&self, event: &MessageEvent) -> Result<CommandOutcome> {
        let enabled = {
            let mut cfg = self.config.write().await;
            cfg.debug = !cfg.debug;
            cfg.debug
        };
        self.gateway.set_verbose(enabled);
        info!(debug = enabled, "Debug flag toggled");

        self.gateway.react(event, "white_check_mark").await;
        Ok(CommandOutcome::DebugToggled(enabled))
    }

    /// `save`: persists the relay config; failures go back to the sender as
    /// reply text instead of a reaction.
    async fn save(&self, event: &MessageEvent) -> Result<CommandOutcome> {
        let snapshot = self.config.read().await.clone();
        match snapshot.save(&self.config_path) {
            Ok(()) => {
                self.gateway.react(event, "white_check_mark").await;
                Ok(CommandOutcome::Saved)
            }
            Err(e) => {
                self.gateway.reply_in_private(event, &e.to_string()).await;
                Ok(CommandOutcome::SaveFailed)
            }
        }
    }
}
