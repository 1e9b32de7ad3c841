//! Core types and traits: events, outcomes, the gateway seam, errors, logging.
//! Transport-agnostic; the Slack transport lives in `crate::slack`.

pub mod error;
pub mod gateway;
pub mod logger;
pub mod types;

pub use error::{BotError, Result};
pub use gateway::{ChatGateway, MessageAttachment};
pub use logger::init_tracing;
pub use types::{ChannelKind, CommandOutcome, MessageEvent, RouteOutcome, ToCoreEvent, UserProfile};
