//! Role - Who authored a message
//!
//! Conversations alternate between a human user and the assistant.

use serde::{Deserialize, Serialize};

/// The author of a message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Assistant,
}

impl Role {
    /// Check if this is a user message
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }

    /// Check if this is an assistant message
    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant)
    }
}
