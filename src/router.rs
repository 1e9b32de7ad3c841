//! Router: classifies incoming events and dispatches channel triggers.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::commands::CommandInterpreter;
use crate::config::RelayConfig;
use crate::core::{
    ChannelKind, ChatGateway, MessageAttachment, MessageEvent, Result, RouteOutcome,
};
use crate::mention::{trigger_word, uids_as_links};

/// Routes every incoming event: guard checks, direct/channel classification,
/// then command interpretation or trigger dispatch.
pub struct Router {
    config: Arc<RwLock<RelayConfig>>,
    gateway: Arc<dyn ChatGateway>,
    interpreter: CommandInterpreter,
}

impl Router {
    /// Creates a router over the shared relay config and gateway.
    pub fn new(
        config: Arc<RwLock<RelayConfig>>,
        gateway: Arc<dyn ChatGateway>,
        interpreter: CommandInterpreter,
    ) -> Self {
        Self {
            config,
            gateway,
            interpreter,
        }
    }

    /// Handles one event. `Ignored` means no side effect occurred.
    #[instrument(skip(self, event))]
    pub async fn route(&self, event: &MessageEvent) -> Result<RouteOutcome> {
        if self.config.read().await.debug {
            debug!(?event, "incoming event");
        }

        if !event.is_user_message() {
            return Ok(RouteOutcome::Ignored);
        }

        match event.channel_kind() {
            Some(ChannelKind::Direct) => {
                let outcome = self.interpreter.interpret(event).await?;
                Ok(RouteOutcome::Command(outcome))
            }
            Some(ChannelKind::Channel) => self.dispatch_trigger(event).await,
            None => Ok(RouteOutcome::Ignored),
        }
    }

    /// Channel-message path: `@trigger ...` fan-out to configured recipients,
    /// sequentially and in configured order, then aggregate status back to
    /// the sender.
    async fn dispatch_trigger(&self, event: &MessageEvent) -> Result<RouteOutcome> {
        let Some(trigger) = trigger_word(&event.text) else {
            return Ok(RouteOutcome::Ignored);
        };

        let receivers = {
            let cfg = self.config.read().await;
            cfg.notifiers.get(trigger).cloned().unwrap_or_default()
        };

        let mut notified = Vec::new();
        let mut failed = Vec::new();

        for receiver in receivers {
            match self.share_to(event, &receiver).await {
                Ok(()) => notified.push(receiver),
                Err(e) => {
                    error!(receiver = %receiver, error = %e, "Failed to send notification");
                    failed.push(receiver);
                }
            }
        }

        if !failed.is_empty() {
            let status = format!("Failed to send notification to {} users!", failed.len());
            self.gateway.reply_in_private(event, &status).await;
            self.gateway.react(event, "warning").await;
        }
        if !notified.is_empty() {
            let status = format!("Notified: {}", uids_as_links(&notified).join(", "));
            self.gateway.reply_in_private(event, &status).await;
            self.gateway.react(event, "mega").await;
        }

        info!(
            trigger = %trigger,
            notified = notified.len(),
            failed = failed.len(),
            "Trigger dispatched"
        );

        Ok(RouteOutcome::Dispatched { notified, failed })
    }

    /// Forwards the original message to one recipient, attributed to the
    /// original poster and origin channel.
    async fn share_to(&self, event: &MessageEvent, receiver: &str) -> Result<()> {
        let poster = self.gateway.lookup_user(&event.user_id).await?;

        let attachment = MessageAttachment {
            author_icon: poster.image_url,
            author_name: poster.name.clone(),
            author_subname: poster.real_name,
            fallback: format!("{}: {}", poster.name, event.text),
            text: event.text.clone(),
            footer: format!("Posted in <#{}>", event.channel_id),
            ts: event.timestamp.clone(),
        };

        self.gateway
            .send_message(receiver, "", Some(attachment))
            .await
    }
}
