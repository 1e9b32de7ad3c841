//! Real-time event loop over the Slack RTM WebSocket.
//!
//! `rtm.connect` hands out a WebSocket URL; events then arrive as JSON
//! frames. Each `message` frame is converted to a core event and routed on
//! its own task, so events are handled independently.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, error, info, warn};

use crate::core::{MessageEvent, ToCoreEvent};
use crate::router::Router;
use crate::slack::SlackGateway;

/// Reconnect backoff (seconds).
const RECONNECT_DELAY_SECS: u64 = 5;

/// Maximum consecutive connection failures before giving up.
const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// A raw RTM frame. Only `message`-typed frames carry the fields below;
/// everything else is matched on `kind` alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RtmEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub bot_id: String,
    #[serde(default)]
    pub subtype: String,
}

/// Adapts an RTM frame to the core event shape.
pub struct RtmEventWrapper<'a>(pub &'a RtmEvent);

impl ToCoreEvent for RtmEventWrapper<'_> {
    fn to_core(&self) -> MessageEvent {
        MessageEvent {
            channel_id: self.0.channel.clone(),
            user_id: self.0.user.clone(),
            text: self.0.text.clone(),
            timestamp: self.0.ts.clone(),
            bot_id: self.0.bot_id.clone(),
            subtype: self.0.subtype.clone(),
        }
    }
}

/// Consumes the real-time event stream until a fatal error.
///
/// Invalid credentials abort immediately with a token hint; other connection
/// failures retry with a fixed delay up to [`MAX_RECONNECT_ATTEMPTS`] times.
pub async fn run_events(gateway: Arc<SlackGateway>, router: Arc<Router>) -> Result<()> {
    let mut attempts: u32 = 0;

    loop {
        let url = match gateway.rtm_connect().await {
            Ok(url) => url,
            Err(e) => {
                if e.to_string().contains("invalid_auth") {
                    bail!("Invalid auth. Check your SLACK_BOT_TOKEN.");
                }
                attempts += 1;
                if attempts > MAX_RECONNECT_ATTEMPTS {
                    bail!("Giving up after {} connection attempts: {}", attempts - 1, e);
                }
                warn!(error = %e, attempt = attempts, "rtm.connect failed, retrying");
                tokio::time::sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
                continue;
            }
        };

        info!("Connecting..");
        let stream = match connect_async(url.as_str()).await {
            Ok((stream, _)) => stream,
            Err(e) => {
                attempts += 1;
                if attempts > MAX_RECONNECT_ATTEMPTS {
                    bail!("Giving up after {} connection attempts: {}", attempts - 1, e);
                }
                warn!(error = %e, attempt = attempts, "WebSocket connect failed, retrying");
                tokio::time::sleep(Duration::from_secs(RECONNECT_DELAY_SECS)).await;
                continue;
            }
        };
        attempts = 0;

        let (mut write, mut read) = stream.split();

        while let Some(frame) = read.next().await {
            match frame {
                Ok(WsMessage::Text(raw)) => dispatch_frame(raw.as_str(), &router),
                Ok(WsMessage::Ping(payload)) => {
                    if let Err(e) = write.send(WsMessage::Pong(payload)).await {
                        warn!(error = %e, "Failed to answer ping");
                        break;
                    }
                }
                Ok(WsMessage::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "WebSocket read error");
                    break;
                }
            }
        }

        warn!("Event stream closed, reconnecting");
    }
}

/// Decodes one frame and hands `message` events to the router on a spawned
/// task. Undecodable frames and unhandled event kinds are dropped.
fn dispatch_frame(raw: &str, router: &Arc<Router>) {
    let event: RtmEvent = match serde_json::from_str(raw) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "Undecodable frame");
            return;
        }
    };

    match event.kind.as_str() {
        "hello" => info!("Hello event received, we are connected!"),
        "message" => {
            let core_event = RtmEventWrapper(&event).to_core();
            let router = Arc::clone(router);
            tokio::spawn(async move {
                if let Err(e) = router.route(&core_event).await {
                    error!(error = %e, "Routing failed");
                }
            });
        }
        kind => debug!(kind = %kind, "Ignoring event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtm_event_to_core() {
        let raw = r#"{
            "type": "message",
            "channel": "C024BE91L",
            "user": "U2147483697",
            "text": "@ops deploy broke",
            "ts": "1355517523.000005"
        }"#;
        let event: RtmEvent = serde_json::from_str(raw).unwrap();
        let core = RtmEventWrapper(&event).to_core();

        assert_eq!(core.channel_id, "C024BE91L");
        assert_eq!(core.user_id, "U2147483697");
        assert_eq!(core.text, "@ops deploy broke");
        assert_eq!(core.timestamp, "1355517523.000005");
        assert!(core.is_user_message());
    }

    #[test]
    fn test_rtm_event_defaults_missing_fields() {
        let event: RtmEvent = serde_json::from_str(r#"{"type": "hello"}"#).unwrap();
        assert_eq!(event.kind, "hello");
        assert!(event.channel.is_empty());

        let core = RtmEventWrapper(&event).to_core();
        assert!(!core.is_user_message());
    }

    #[test]
    fn test_rtm_event_keeps_subtype_and_bot_id() {
        let raw = r#"{"type": "message", "channel": "C1", "user": "U1",
                      "subtype": "message_changed", "bot_id": "B9"}"#;
        let event: RtmEvent = serde_json::from_str(raw).unwrap();
        let core = RtmEventWrapper(&event).to_core();

        assert_eq!(core.subtype, "message_changed");
        assert_eq!(core.bot_id, "B9");
        assert!(!core.is_user_message());
    }
}
