//! Symptom-intake chat: the caller of the triage core.
//!
//! Holds no process state. Each session owns a [`ConversationContext`];
//! the responder borrows the classifier and an optional generator.

pub mod conversation;
pub mod format;
pub mod responder;

pub use conversation::*;
pub use format::*;
pub use responder::*;
