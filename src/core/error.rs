//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error. Config variants split by phase so
//! callers can tell a missing file from a malformed one; delivery and
//! reaction failures stay non-fatal.

use thiserror::Error;

/// Top-level error for the relay bot (config, delivery, reactions, transport, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Config not found: {0}")]
    ConfigNotFound(String),

    #[error("Config decode error: {0}")]
    ConfigDecode(String),

    #[error("Config encode error: {0}")]
    ConfigEncode(String),

    #[error("Config write error: {0}")]
    ConfigWrite(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Reaction error: {0}")]
    Reaction(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
