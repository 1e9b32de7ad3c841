//! Gateway abstraction for the chat platform.
//!
//! [`ChatGateway`] is transport-agnostic; `slack::SlackGateway` implements it
//! via the Slack Web API. Tests substitute a recording double.

use async_trait::async_trait;
use tracing::warn;

use super::error::Result;
use super::types::{MessageEvent, UserProfile};

/// Attachment metadata carried with a forwarded notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageAttachment {
    pub author_name: String,
    pub author_subname: String,
    pub author_icon: String,
    pub fallback: String,
    pub text: String,
    pub footer: String,
    /// Timestamp of the origin message, associated with the attachment.
    pub ts: String,
}

/// Operations the bot needs from the chat platform.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Looks up the profile of a user; fails on unknown or unreachable users.
    async fn lookup_user(&self, user_id: &str) -> Result<UserProfile>;

    /// Sends a message to a user or channel, optionally with an attachment.
    async fn send_message(
        &self,
        target: &str,
        text: &str,
        attachment: Option<MessageAttachment>,
    ) -> Result<()>;

    /// Attaches an emoji reaction to the message at `timestamp` in `channel_id`.
    async fn add_reaction(&self, channel_id: &str, timestamp: &str, name: &str) -> Result<()>;

    /// Toggles transport-level verbose logging.
    fn set_verbose(&self, on: bool);

    /// Sends a private status reply to the event's sender. Failures are
    /// logged, never surfaced.
    async fn reply_in_private(&self, event: &MessageEvent, text: &str) {
        if let Err(e) = self.send_message(&event.user_id, text, None).await {
            warn!(user_id = %event.user_id, error = %e, "Failed to send status reply");
        }
    }

    /// Best-effort reaction on the event's message. Failures are logged,
    /// never surfaced.
    async fn react(&self, event: &MessageEvent, name: &str) {
        if let Err(e) = self
            .add_reaction(&event.channel_id, &event.timestamp, name)
            .await
        {
            warn!(reaction = %name, error = %e, "Failed to add reaction");
        }
    }
}
