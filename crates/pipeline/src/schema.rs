//! Normalized event schema shared by all three feeds.

use serde::{Deserialize, Serialize};

/// Whether the acting user is an automated account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Bot,
    Human,
}

impl UserType {
    pub fn from_bot_flag(bot: bool) -> Self {
        if bot {
            UserType::Bot
        } else {
            UserType::Human
        }
    }
}

/// Canonical event shape published downstream, independent of which
/// upstream schema produced it. Construction is all-or-nothing: either
/// every required field was present or no event is built at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedEvent {
    /// Page title.
    pub title: String,
    /// Wiki domain (e.g. "en.wikipedia.org").
    pub domain: String,
    /// Event time, "YYYY-MM-DDTHH:MM:SSZ".
    pub timestamp: String,
    /// Acting user.
    pub user_name: String,
    /// Bot or human.
    pub user_type: UserType,
    /// Lifetime edit count of the user; only present for creation events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_count: Option<u64>,
}
