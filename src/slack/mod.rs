//! Slack transport: Web API gateway and the real-time event loop.

mod client;
mod socket;

pub use client::SlackGateway;
pub use socket::{run_events, RtmEvent, RtmEventWrapper};
