//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "notify-bot")]
#[command(about = "Slack notification-relay bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override SLACK_BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides
/// SLACK_BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}
