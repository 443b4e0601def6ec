//! Conversation domain module.
//!
//! - `model`: the `Conversation` entity and title derivation
//! - `message`: message, role and metadata types

mod message;
mod model;

pub use message::{Fallacy, Message, MessageMetadata, MessageRole};
pub use model::{Conversation, TITLE_PREFIX_CHARS, derive_title};
