//! Conversation entity and its create/update inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    /// Multi-member channel
    Channel,
    /// Direct conversation with one person
    Person,
}

impl ConversationType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Person => "person",
        }
    }
}

impl std::fmt::Display for ConversationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConversationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "channel" => Ok(Self::Channel),
            "person" => Ok(Self::Person),
            _ => Err(CoreError::InvalidInput(
                "Invalid type: must be \"channel\" or \"person\"".to_owned(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub conversation_type: ConversationType,
    pub avatar_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    pub name: String,
    pub conversation_type: ConversationType,
    pub avatar_url: Option<String>,
}

/// Partial update. `None` leaves a column unchanged; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationPatch {
    pub name: Option<String>,
    pub conversation_type: Option<ConversationType>,
    pub avatar_url: Option<Option<String>>,
}

impl ConversationPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.conversation_type.is_none() && self.avatar_url.is_none()
    }
}
