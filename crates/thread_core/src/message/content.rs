//! ContentPart - Message content types
//!
//! Defines the different types of content that can appear in messages.

use serde::{Deserialize, Serialize};

/// A part of message content (text, image, etc.)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },

    /// Image content referenced by URL
    Image {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

impl ContentPart {
    /// Create a text content part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image content part
    pub fn image(url: impl Into<String>) -> Self {
        Self::Image {
            url: url.into(),
            detail: None,
        }
    }

    /// Get text content if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Container for message content parts
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MessageContent {
    pub parts: Vec<ContentPart>,
}

impl MessageContent {
    /// Create empty content
    pub fn new() -> Self {
        Self::default()
    }

    /// Create content with a single text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![ContentPart::text(text)],
        }
    }

    /// Add a content part
    pub fn push(&mut self, part: ContentPart) {
        self.parts.push(part);
    }

    /// Get all text content concatenated
    pub fn as_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Total length of the text content
    pub fn text_len(&self) -> usize {
        self.parts.iter().filter_map(|p| p.as_text()).map(|s| s.len()).sum()
    }

    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_text() {
        let content = MessageContent::text("Hello, world!");
        assert_eq!(content.as_text(), "Hello, world!");
    }

    #[test]
    fn test_content_parts() {
        let mut content = MessageContent::new();
        content.push(ContentPart::text("Hello "));
        content.push(ContentPart::text("world!"));
        assert_eq!(content.as_text(), "Hello world!");
        assert_eq!(content.text_len(), 12);
    }

    #[test]
    fn test_content_serialization_tag() {
        let part = ContentPart::text("hi");
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains("\"type\":\"text\""));

        let back: ContentPart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, part);
    }
}
