//! Slack Web API gateway.
//!
//! Implements [`ChatGateway`] over the REST Web API and exposes
//! `rtm.connect` for the real-time event loop. Every call posts JSON with a
//! bearer token and checks the `ok` envelope field.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::core::{BotError, ChatGateway, MessageAttachment, Result, UserProfile};

/// Slack Web API base URL.
const SLACK_API_BASE: &str = "https://slack.com/api";

/// Gateway backed by the Slack Web API.
pub struct SlackGateway {
    http: reqwest::Client,
    token: String,
    base_url: String,
    verbose: AtomicBool,
}

impl SlackGateway {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, SLACK_API_BASE)
    }

    /// Gateway against a custom API base URL (tests point this at a local
    /// mock server).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into(),
            verbose: AtomicBool::new(false),
        }
    }

    /// Calls one Web API method with a JSON body and unwraps the `ok`
    /// envelope. Error strings are the method name plus the API error code.
    async fn call(&self, method: &str, body: Value) -> std::result::Result<Value, String> {
        if self.verbose.load(Ordering::Relaxed) {
            debug!(method = %method, body = %body, "slack api request");
        }

        let resp = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("{}: {}", method, e))?;

        let parsed: Value = resp
            .json()
            .await
            .map_err(|e| format!("{}: {}", method, e))?;

        if self.verbose.load(Ordering::Relaxed) {
            debug!(method = %method, response = %parsed, "slack api response");
        }

        if parsed["ok"].as_bool() != Some(true) {
            let err = parsed["error"].as_str().unwrap_or("unknown");
            return Err(format!("{} failed: {}", method, err));
        }
        Ok(parsed)
    }

    /// Calls `rtm.connect` and returns the WebSocket URL for the event
    /// stream. An `invalid_auth` API error surfaces in the error text so the
    /// caller can abort with a token hint.
    pub async fn rtm_connect(&self) -> Result<String> {
        let body = self
            .call("rtm.connect", json!({}))
            .await
            .map_err(BotError::Gateway)?;

        body["url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| BotError::Gateway("no url in rtm.connect response".to_string()))
    }
}

#[async_trait]
impl ChatGateway for SlackGateway {
    async fn lookup_user(&self, user_id: &str) -> Result<UserProfile> {
        let body = self
            .call("users.info", json!({ "user": user_id }))
            .await
            .map_err(BotError::Gateway)?;

        let user = &body["user"];
        Ok(UserProfile {
            name: user["name"].as_str().unwrap_or_default().to_string(),
            real_name: user["profile"]["real_name"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            image_url: user["profile"]["image_48"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
        })
    }

    async fn send_message(
        &self,
        target: &str,
        text: &str,
        attachment: Option<MessageAttachment>,
    ) -> Result<()> {
        let mut body = json!({
            "channel": target,
            "text": text,
            "as_user": true,
        });
        if let Some(a) = attachment {
            body["attachments"] = json!([{
                "author_icon": a.author_icon,
                "author_name": a.author_name,
                "author_subname": a.author_subname,
                "fallback": a.fallback,
                "text": a.text,
                "footer": a.footer,
                "mrkdwn_in": ["text"],
                "ts": a.ts,
            }]);
        }

        self.call("chat.postMessage", body)
            .await
            .map(|_| ())
            .map_err(BotError::Delivery)
    }

    async fn add_reaction(&self, channel_id: &str, timestamp: &str, name: &str) -> Result<()> {
        self.call(
            "reactions.add",
            json!({
                "channel": channel_id,
                "timestamp": timestamp,
                "name": name,
            }),
        )
        .await
        .map(|_| ())
        .map_err(BotError::Reaction)
    }

    fn set_verbose(&self, on: bool) {
        self.verbose.store(on, Ordering::Relaxed);
    }
}
