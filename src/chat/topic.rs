//! Topic classification.
//!
//! A [`Topic`] is a coarse label derived from free text. It is never stored; it
//! only decides which follow-up suggestions accompany a reply.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::chat::error::ChatResult;

/// Coarse category of a user message.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Clock, dates, days.
    Time,
    /// Plans, schedules, priorities.
    Planning,
    /// Work, focus, getting things done.
    Productivity,
    /// Feelings, stress, energy.
    Mood,
    /// Anything else.
    #[default]
    General,
}

impl Topic {
    /// Every topic, in classification order.
    pub const ALL: [Self; 5] = [
        Self::Time,
        Self::Planning,
        Self::Productivity,
        Self::Mood,
        Self::General,
    ];

    /// Stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Planning => "planning",
            Self::Productivity => "productivity",
            Self::Mood => "mood",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| format!("unknown topic: {s}"))
    }
}

/// A pattern rule mapping a regex to a topic.
struct TopicRule {
    pattern: Regex,
    topic: Topic,
}

/// Ordered regex classifier. The first matching rule wins.
pub struct TopicClassifier {
    rules: Vec<TopicRule>,
}

impl TopicClassifier {
    /// Compile the classification rules.
    ///
    /// # Errors
    /// Returns an error if any regex pattern is invalid.
    pub fn new() -> ChatResult<Self> {
        let rules = vec![
            TopicRule {
                pattern: Regex::new(
                    r"\b(time|clock|o'clock|date|today|tonight|tomorrow|yesterday|hours?|minutes?)\b",
                )?,
                topic: Topic::Time,
            },
            TopicRule {
                pattern: Regex::new(
                    r"\b(plan|plans|planning|planner|schedule|scheduling|organi[sz]e|agenda|calendar|week|weekend|goals?|priorit(y|ies|ize))\b",
                )?,
                topic: Topic::Planning,
            },
            TopicRule {
                pattern: Regex::new(
                    r"\b(productiv\w*|focus\w*|procrastinat\w*|motivat\w*|distract\w*|work|working|tasks?|deadlines?|efficien\w*|habits?)\b",
                )?,
                topic: Topic::Productivity,
            },
            TopicRule {
                pattern: Regex::new(
                    r"\b(tired|exhausted|stress\w*|anxious|anxiety|sad|overwhelm\w*|burn(ed|t)? ?out|lonely|upset|worried|mood|feel\w*|happy|angry|drained)\b",
                )?,
                topic: Topic::Mood,
            },
        ];

        Ok(Self { rules })
    }

    /// Classify raw text. Falls back to [`Topic::General`].
    #[must_use]
    pub fn classify(&self, text: &str) -> Topic {
        let normalized = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&normalized))
            .map_or(Topic::General, |rule| rule.topic)
    }
}
