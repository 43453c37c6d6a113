//! Conversation turn types.
//!
//! The caller resends the full conversation on every request, so these are
//! plain value objects: they are deserialized from the request body, borrowed
//! by the prompt composer, and serialized again toward the completion service.

use serde::{Deserialize, Serialize};

/// The role of a speaker in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The parent talking to Dawn
    User,
    /// Dawn's earlier replies
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Speaker label used when a turn is rendered into the instruction document.
    pub fn speaker(&self) -> &'static str {
        match self {
            Role::User => "Parent",
            Role::Assistant => "Dawn",
        }
    }
}

/// A single turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who said it
    pub role: Role,

    /// The text content
    pub content: String,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
