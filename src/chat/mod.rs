//! Rule-based chat engine.
//!
//! Classifies the latest user message into a [`Topic`], extracts recurring
//! themes from the user's history, and composes a canned reply plus follow-up
//! suggestions. Nothing here performs I/O or keeps state between calls.

pub mod composer;
pub mod config;
pub mod error;
pub mod message;
pub mod suggestions;
pub mod themes;
pub mod topic;

pub use composer::{ComposedReply, ReplyComposer, ReplyKind};
pub use config::ChatConfig;
pub use error::{ChatError, ChatResult};
pub use message::{Conversation, Message, Role};
pub use suggestions::{suggestion_list, suggestions_for};
pub use themes::ThemeExtractor;
pub use topic::{Topic, TopicClassifier};
