//! Follow-up prompts offered after each reply.

use crate::chat::topic::Topic;

/// Number of suggestions returned per topic.
pub const SUGGESTION_COUNT: usize = 3;

const TIME: [&str; SUGGESTION_COUNT] = [
    "Help me block out my afternoon",
    "What should I do first today?",
    "How do I make time for a break?",
];

const PLANNING: [&str; SUGGESTION_COUNT] = [
    "Help me prioritize my tasks",
    "Break my week into steps",
    "What should I tackle first?",
];

const PRODUCTIVITY: [&str; SUGGESTION_COUNT] = [
    "Give me a focus technique",
    "How do I stop procrastinating?",
    "Suggest a short work sprint",
];

const MOOD: [&str; SUGGESTION_COUNT] = [
    "I need a quick way to unwind",
    "Help me reset my energy",
    "Can we talk through what's stressing me?",
];

const GENERAL: [&str; SUGGESTION_COUNT] = [
    "Help me plan my day",
    "I'm feeling stuck",
    "Give me a productivity tip",
];

/// Fixed follow-up prompts for a topic.
#[must_use]
pub const fn suggestions_for(topic: Topic) -> [&'static str; SUGGESTION_COUNT] {
    match topic {
        Topic::Time => TIME,
        Topic::Planning => PLANNING,
        Topic::Productivity => PRODUCTIVITY,
        Topic::Mood => MOOD,
        Topic::General => GENERAL,
    }
}

/// Owned copy of [`suggestions_for`], ready for serialization.
#[must_use]
pub fn suggestion_list(topic: Topic) -> Vec<String> {
    suggestions_for(topic).iter().map(ToString::to_string).collect()
}
