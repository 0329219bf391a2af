use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thread_core::{MessageContent, Role};
use uuid::Uuid;

/// A single message, owned by exactly one branch.
///
/// Messages are immutable once appended: they are never edited in place,
/// reordered, or copied into another branch's stored list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,

    /// Back-reference to the owning conversation, for display grouping only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<Uuid>,

    /// Back-reference to the owning branch, for display grouping only.
    /// Traversal never consults this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<Uuid>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            thread_id: None,
            branch_id: None,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Total length of the message's text content
    pub fn content_len(&self) -> usize {
        self.content.text_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hello");
        assert!(user.role.is_user());
        assert_eq!(user.content.as_text(), "hello");
        assert!(user.branch_id.is_none());

        let assistant = Message::assistant("hi there");
        assert!(assistant.role.is_assistant());
        assert_eq!(assistant.content_len(), 8);
    }
}
