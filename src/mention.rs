//! Shared pure functions for trigger-word extraction and mention parsing.
//!
//! Used by the router (trigger lookup in channel messages) and the command
//! interpreter (`set` recipient parsing, reply formatting).

/// Returns the trigger word of a channel message: the first
/// whitespace-delimited token after a leading `@`. `None` when the text does
/// not start with `@` or carries no token after it.
#[inline]
pub fn trigger_word(text: &str) -> Option<&str> {
    text.strip_prefix('@')?.split_whitespace().next()
}

/// Filters raw tokens down to well-formed user mentions (`<@U...>`), strips
/// the wrapper and returns the bare IDs in input order. Tokens that do not
/// match the wrapper exactly are dropped.
pub fn parse_receivers<'a, I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .filter(|t| t.starts_with("<@U") && t.ends_with('>'))
        .map(|t| t[2..t.len() - 1].to_string())
        .collect()
}

/// Renders bare user IDs as mention links (`<@UID>`).
#[inline]
pub fn uids_as_links(uids: &[String]) -> Vec<String> {
    uids.iter().map(|uid| format!("<@{}>", uid)).collect()
}
