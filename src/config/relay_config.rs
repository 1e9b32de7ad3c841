//! Dynamic relay configuration: admin, trigger mapping, debug flag.
//!
//! Persisted as pretty-printed JSON; loading replaces all fields wholesale.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{BotError, Result};

/// Configuration mutated at runtime by admin commands.
///
/// `notifiers` maps a trigger word (case-sensitive, no leading `@`) to the
/// user IDs notified for it, in notify order. `BTreeMap` keeps `list` output
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub admin: String,
    #[serde(default)]
    pub notifiers: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub debug: bool,
}

impl RelayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the whole config file and decodes it, replacing all fields.
    /// An absent file is [`BotError::ConfigNotFound`]; malformed content is
    /// [`BotError::ConfigDecode`]. Both are fatal at startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BotError::ConfigNotFound(path.display().to_string())
            } else {
                BotError::Io(e)
            }
        })?;
        let cfg: RelayConfig =
            serde_json::from_str(&raw).map_err(|e| BotError::ConfigDecode(e.to_string()))?;
        info!(path = %path.display(), "Loaded config");
        Ok(cfg)
    }

    /// Encodes the config as pretty JSON and writes it wholesale. The write
    /// goes to a temp file next to the target and is renamed over it, so the
    /// destination is never left partially written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let encoded =
            serde_json::to_string_pretty(self).map_err(|e| BotError::ConfigEncode(e.to_string()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encoded).map_err(|e| BotError::ConfigWrite(e.to_string()))?;
        fs::rename(&tmp, path).map_err(|e| BotError::ConfigWrite(e.to_string()))?;
        info!(path = %path.display(), "Saved config");
        Ok(())
    }
}
