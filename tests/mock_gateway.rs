//! Recording [`ChatGateway`] test double shared by router and command tests.
//!
//! Records every call in order; deliveries to scripted targets fail so tests
//! can exercise the partial-failure path.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use notify_bot::{BotError, ChatGateway, MessageAttachment, Result, UserProfile};

/// One observed gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    LookupUser {
        user_id: String,
    },
    SendMessage {
        target: String,
        text: String,
        attachment: Option<MessageAttachment>,
    },
    AddReaction {
        channel_id: String,
        timestamp: String,
        name: String,
    },
    SetVerbose(bool),
}

#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    fail_targets: HashSet<String>,
    fail_lookups: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliveries to this target will fail.
    pub fn fail_delivery_to(mut self, target: &str) -> Self {
        self.fail_targets.insert(target.to_string());
        self
    }

    /// All user lookups will fail.
    pub fn fail_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    /// Snapshot of the recorded calls, in call order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatGateway for RecordingGateway {
    async fn lookup_user(&self, user_id: &str) -> Result<UserProfile> {
        self.record(GatewayCall::LookupUser {
            user_id: user_id.to_string(),
        });
        if self.fail_lookups {
            return Err(BotError::Gateway(
                "users.info failed: user_not_found".to_string(),
            ));
        }
        Ok(UserProfile {
            name: "poster".to_string(),
            real_name: "Poster Person".to_string(),
            image_url: "https://example.com/avatar48.png".to_string(),
        })
    }

    async fn send_message(
        &self,
        target: &str,
        text: &str,
        attachment: Option<MessageAttachment>,
    ) -> Result<()> {
        self.record(GatewayCall::SendMessage {
            target: target.to_string(),
            text: text.to_string(),
            attachment,
        });
        if self.fail_targets.contains(target) {
            return Err(BotError::Delivery(format!("delivery to {} refused", target)));
        }
        Ok(())
    }

    async fn add_reaction(&self, channel_id: &str, timestamp: &str, name: &str) -> Result<()> {
        self.record(GatewayCall::AddReaction {
            channel_id: channel_id.to_string(),
            timestamp: timestamp.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    fn set_verbose(&self, on: bool) {
        self.record(GatewayCall::SetVerbose(on));
    }
}
