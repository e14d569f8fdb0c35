//! Application state shared across all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::chat::{ChatConfig, ChatResult, ReplyComposer};

/// Shared application state.
///
/// Read-only after construction; requests never mutate it.
pub struct AppState {
    /// Reply composer with compiled rules.
    pub composer: ReplyComposer,
    /// Directory the chat UI is served from.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or a rule fails to compile.
    pub fn new(config: &ChatConfig, static_dir: impl Into<PathBuf>) -> ChatResult<Arc<Self>> {
        let composer = ReplyComposer::new(config)?;
        Ok(Arc::new(Self {
            composer,
            static_dir: static_dir.into(),
        }))
    }
}
