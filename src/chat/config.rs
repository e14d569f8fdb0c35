//! Configuration for the chat engine.

use crate::chat::error::{ChatError, ChatResult};

/// Default agent name used in replies.
pub const DEFAULT_AGENT_NAME: &str = "Echo";

/// Settings that shape composed replies.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Fixed name the agent introduces itself with.
    pub agent_name: String,
    /// Maximum number of themes interpolated into generic replies.
    pub max_themes: usize,
    /// Tokens shorter than this (in characters) never count as themes.
    pub min_theme_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            max_themes: 3,
            min_theme_chars: 4,
        }
    }
}

impl ChatConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the environment.
    ///
    /// Reads `ECHO_AGENT_NAME`; everything else keeps its default.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("ECHO_AGENT_NAME") {
            Ok(name) if !name.trim().is_empty() => Self::default().with_agent_name(name.trim()),
            _ => Self::default(),
        }
    }

    /// Set the agent name.
    #[must_use]
    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = name.into();
        self
    }

    /// Set the number of themes to surface.
    #[must_use]
    pub const fn with_max_themes(mut self, max_themes: usize) -> Self {
        self.max_themes = max_themes;
        self
    }

    /// Set the minimum theme token length.
    #[must_use]
    pub const fn with_min_theme_chars(mut self, min_theme_chars: usize) -> Self {
        self.min_theme_chars = min_theme_chars;
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> ChatResult<()> {
        if self.agent_name.trim().is_empty() {
            return Err(ChatError::InvalidConfig(
                "agent_name must not be empty".to_string(),
            ));
        }

        if self.max_themes == 0 {
            return Err(ChatError::InvalidConfig(
                "max_themes must be > 0".to_string(),
            ));
        }

        if self.min_theme_chars == 0 {
            return Err(ChatError::InvalidConfig(
                "min_theme_chars must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
