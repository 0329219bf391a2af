use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::structs::message::Message;

/// A single, coherent line of conversation diverging from its parent at a
/// specific message.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,

    /// The branch this one was forked from. `None` for a root branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,

    /// The message in the parent branch's own list after which this
    /// branch diverges. `None` iff `parent_id` is `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<Uuid>,

    /// Display hint for UI layers; tree logic never consults it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// An ordered list of messages owned exclusively by this branch.
    /// Append-only; insertion order is chronological order.
    pub messages: Vec<Message>,

    pub created_at: DateTime<Utc>,
}

impl Branch {
    /// Create a root branch with no parent and no messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id: None,
            parent_message_id: None,
            color: None,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a branch forked from a parent at a specific message.
    pub(crate) fn forked(
        name: impl Into<String>,
        parent_id: Uuid,
        parent_message_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id: Some(parent_id),
            parent_message_id: Some(parent_message_id),
            color: None,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Check if this is a root branch
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether this branch directly owns the given message.
    ///
    /// Inherited ancestor messages do not count; only the branch's own
    /// `messages` list is consulted.
    pub fn owns_message(&self, message_id: Uuid) -> bool {
        self.messages.iter().any(|m| m.id == message_id)
    }

    /// Get an owned message by id
    pub fn get_message(&self, message_id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == message_id)
    }

    /// The most recently appended message, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_creation() {
        let branch = Branch::new("main");

        assert_eq!(branch.name, "main");
        assert!(branch.is_root());
        assert!(branch.messages.is_empty());
        assert!(branch.parent_message_id.is_none());
        assert!(branch.color.is_none());
    }

    #[test]
    fn test_forked_branch_references_parent() {
        let parent = Branch::new("main");
        let fork_point = Uuid::new_v4();
        let child = Branch::forked("alt", parent.id, fork_point);

        assert!(!child.is_root());
        assert_eq!(child.parent_id, Some(parent.id));
        assert_eq!(child.parent_message_id, Some(fork_point));
        assert!(child.messages.is_empty());
    }
}
