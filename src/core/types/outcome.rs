//! Observable routing results.
//!
//! Malformed input is dropped silently by design; these variants make the
//! drop visible to tests without adding user-facing error reporting.

/// Result of routing one event. `Ignored` means the event failed a guard or
/// matched nothing and no side effect occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Ignored,
    /// Channel trigger dispatched. Both lists preserve configured recipient
    /// order, not delivery completion time.
    Dispatched {
        notified: Vec<String>,
        failed: Vec<String>,
    },
    /// Direct message interpreted as a command.
    Command(CommandOutcome),
}

/// Result of interpreting a direct-message command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// `list`: number of triggers reported.
    Listed(usize),
    /// Non-admin sender asked for anything but `list`.
    HelpSent,
    /// `set`: trigger overwritten with the parsed recipients.
    Set {
        trigger: String,
        receivers: Vec<String>,
    },
    /// `del`: trigger removed (absent triggers ack the same way).
    Deleted(String),
    /// `debug`: new value of the flag.
    DebugToggled(bool),
    Saved,
    /// `save` failed; the error text was sent back to the sender.
    SaveFailed,
    /// Unrecognized or malformed command, dropped silently.
    Ignored,
}
