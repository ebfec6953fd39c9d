//! Application layer - The conversation state machine and its errors
//!
//! This layer contains:
//! - Conversation: Event handling, session transitions, screen rendering
//! - Errors: Domain-specific errors

pub mod conversation;
pub mod errors;

pub use conversation::{ConversationService, ConversationSettings};
