//! Keyword-frequency theme extraction over the user's side of a conversation.

use std::cmp::Reverse;
use std::collections::HashMap;

use regex::Regex;

use crate::chat::config::ChatConfig;
use crate::chat::error::ChatResult;
use crate::chat::message::Conversation;

/// Extracts the most frequent longer words the user has typed.
pub struct ThemeExtractor {
    separators: Regex,
    min_chars: usize,
    max_themes: usize,
}

impl ThemeExtractor {
    /// Create an extractor using the limits in `config`.
    ///
    /// # Errors
    /// Returns an error if the separator pattern fails to compile.
    pub fn new(config: &ChatConfig) -> ChatResult<Self> {
        Ok(Self {
            separators: Regex::new(r"[^\p{L}\p{N}\s]+")?,
            min_chars: config.min_theme_chars,
            max_themes: config.max_themes,
        })
    }

    /// Return up to `max_themes` tokens by descending frequency.
    ///
    /// Equal counts keep first-encountered order.
    #[must_use]
    pub fn extract(&self, conversation: &Conversation) -> Vec<String> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for message in conversation.user_messages() {
            let lowered = message.content().to_lowercase();
            let cleaned = self.separators.replace_all(&lowered, " ");
            for token in cleaned.split_whitespace() {
                if token.chars().count() < self.min_chars {
                    continue;
                }
                let slot = *index.entry(token.to_string()).or_insert_with(|| {
                    counts.push((token.to_string(), 0));
                    counts.len() - 1
                });
                counts[slot].1 += 1;
            }
        }

        // stable, so ties keep first-seen order
        counts.sort_by_key(|entry| Reverse(entry.1));
        counts
            .into_iter()
            .take(self.max_themes)
            .map(|(token, _)| token)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Message;

    fn extractor() -> ThemeExtractor {
        ThemeExtractor::new(&ChatConfig::default()).unwrap()
    }

    #[test]
    fn test_most_frequent_first() {
        let conversation: Conversation = vec![
            Message::user("I love hiking and climbing"),
            Message::user("climbing is fun"),
        ]
        .into();

        let themes = extractor().extract(&conversation);
        assert_eq!(themes, vec!["climbing", "love", "hiking"]);
    }

    #[test]
    fn test_ignores_assistant_and_short_words() {
        let conversation: Conversation = vec![
            Message::assistant("gardening gardening gardening"),
            Message::user("the cat sat on a mat"),
            Message::user("Cooking, cooking... COOKING!"),
        ]
        .into();

        let themes = extractor().extract(&conversation);
        assert_eq!(themes, vec!["cooking"]);
    }

    #[test]
    fn test_punctuation_splits_words() {
        let conversation: Conversation = vec![Message::user("deep-work sessions/blocks")].into();

        let themes = extractor().extract(&conversation);
        assert_eq!(themes, vec!["deep", "work", "sessions"]);
    }

    #[test]
    fn test_empty_conversation() {
        assert!(extractor().extract(&Conversation::new()).is_empty());
    }

    #[test]
    fn test_respects_configured_limits() {
        let config = ChatConfig::new().with_max_themes(1).with_min_theme_chars(3);
        let extractor = ThemeExtractor::new(&config).unwrap();
        let conversation: Conversation = vec![Message::user("fun run fun")].into();

        assert_eq!(extractor.extract(&conversation), vec!["fun"]);
    }
}
