//! thread_core - Core message types for the branching conversation system
//!
//! This crate provides the foundational types used across the conversation crates:
//! - `message` - Role and message content types

pub mod message;

// Re-export commonly used types
pub use message::{ContentPart, MessageContent, Role};
