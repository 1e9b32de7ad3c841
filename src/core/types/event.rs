//! Message event and channel classification types.

use serde::{Deserialize, Serialize};

/// Kind of conversation an event came from. Decided once at the boundary from
/// the channel-identifier prefix; identifiers with any other prefix are not
/// classified and the event is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Direct (private) conversation; identifiers start with `D`.
    Direct,
    /// Regular channel; identifiers start with `C`.
    Channel,
}

impl ChannelKind {
    /// Classifies a channel identifier by its prefix. Returns `None` for
    /// identifiers that are neither direct conversations nor channels.
    pub fn classify(channel_id: &str) -> Option<Self> {
        if channel_id.starts_with('D') {
            Some(ChannelKind::Direct)
        } else if channel_id.starts_with('C') {
            Some(ChannelKind::Channel)
        } else {
            None
        }
    }
}

/// A single incoming message event; read-only to the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageEvent {
    pub channel_id: String,
    pub user_id: String,
    pub text: String,
    pub timestamp: String,
    /// Non-empty when the message was authored by a bot.
    pub bot_id: String,
    /// Non-empty for edits, deletions, joins and other non-plain messages.
    pub subtype: String,
}

impl MessageEvent {
    /// True for genuine user-authored messages: not bot-originated, with a
    /// sender, and no subtype.
    pub fn is_user_message(&self) -> bool {
        self.bot_id.is_empty() && !self.user_id.is_empty() && self.subtype.is_empty()
    }

    /// Channel kind from the identifier prefix; `None` when unclassifiable.
    pub fn channel_kind(&self) -> Option<ChannelKind> {
        ChannelKind::classify(&self.channel_id)
    }
}

/// Converts a transport-specific event type to a core [`MessageEvent`].
pub trait ToCoreEvent: Send + Sync {
    fn to_core(&self) -> MessageEvent;
}
