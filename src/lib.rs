//! # Slack notification-relay bot
//!
//! Listens for channel messages starting with an `@trigger` word, forwards
//! them by direct message to the recipients configured for that trigger, and
//! reports delivery status back to the sender. A single admin manages the
//! trigger mapping over direct-message commands (`list`, `set`, `del`,
//! `debug`, `save`).

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod mention;
pub mod router;
pub mod runner;
pub mod slack;

pub use cli::{load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, BotError, ChannelKind, ChatGateway, CommandOutcome, MessageAttachment,
    MessageEvent, Result, RouteOutcome, ToCoreEvent, UserProfile,
};

pub use commands::CommandInterpreter;
pub use config::{BotConfig, RelayConfig};
pub use mention::{parse_receivers, trigger_word, uids_as_links};
pub use router::Router;
pub use runner::{build_router, run_bot};
pub use slack::{RtmEvent, RtmEventWrapper, SlackGateway};
