//! Reply composition.
//!
//! The composer looks at the whole conversation and picks a hand-authored reply:
//!
//! 1. Empty history: a random greeting.
//! 2. No user message yet: a listening filler.
//! 3. Blank latest user message: a patient filler.
//! 4. First matching [`ReplyKind`] rule against the latest user message.
//! 5. Otherwise a generic reply personalised with extracted themes.
//!
//! Composition is total. Randomness and wall-clock time are inputs so callers
//! (and tests) control both.

use chrono::NaiveDateTime;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use tracing::debug;

use crate::chat::config::ChatConfig;
use crate::chat::error::ChatResult;
use crate::chat::message::Conversation;
use crate::chat::themes::ThemeExtractor;
use crate::chat::topic::{Topic, TopicClassifier};

/// Opening lines for an empty conversation.
pub const GREETINGS: [&str; 4] = [
    "Hi there! What's on your mind today?",
    "Hello! How can I make your day a little easier?",
    "Hey! I'm all ears. What would you like to talk about?",
    "Welcome back! What are we working through today?",
];

/// Reply when the history holds no user message.
pub const LISTENING_REPLY: &str =
    "I'm tuned in. Share whatever's on your mind and we'll take it from there.";

/// Reply when the latest user message is blank.
pub const TAKE_YOUR_TIME_REPLY: &str = "Take your time. I'm here whenever you're ready.";

const HELP_REPLY: &str = "I'd be glad to help. Tell me a little more about what you're \
                          working through and we'll untangle it together.";
const PLANNING_REPLY: &str = "Let's map it out. What are the one or two things that absolutely \
                              need to happen, and what can wait?";
const FATIGUE_REPLY: &str = "That sounds heavy. Be gentle with yourself. \
                             Would a short break or a smaller next step help right now?";
const FOCUS_REPLY: &str = "Try picking a single tiny task and giving it fifteen focused minutes. \
                           Momentum usually follows action.";
const GRATITUDE_REPLY: &str = "Anytime! I'm here whenever you want to keep going.";

/// Hand-authored reply families, in match order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReplyKind {
    /// Hello, hey, good morning.
    Greeting,
    /// Asking for the agent's name.
    Name,
    /// Asking for the time or date.
    Clock,
    /// Asking for help or advice.
    Help,
    /// Plans and schedules.
    Planning,
    /// Tiredness and stress.
    Fatigue,
    /// Focus and motivation.
    Focus,
    /// Thanks.
    Gratitude,
    /// Questions about what the agent is.
    Identity,
}

/// A pattern rule mapping a regex to a reply family.
struct ReplyRule {
    pattern: Regex,
    kind: ReplyKind,
}

/// The reply text plus the topic that drives suggestions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComposedReply {
    /// Assistant reply.
    pub reply: String,
    /// Topic of the latest user message.
    pub topic: Topic,
}

impl ComposedReply {
    fn general(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            topic: Topic::General,
        }
    }
}

/// Rule-based reply selector.
pub struct ReplyComposer {
    agent_name: String,
    classifier: TopicClassifier,
    themes: ThemeExtractor,
    rules: Vec<ReplyRule>,
}

impl ReplyComposer {
    /// Build a composer from `config`.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or a pattern fails to compile.
    pub fn new(config: &ChatConfig) -> ChatResult<Self> {
        config.validate()?;

        let rules = vec![
            ReplyRule {
                pattern: Regex::new(
                    r"^(hi|hello|hey|hiya|howdy|yo|good (morning|afternoon|evening))\b",
                )?,
                kind: ReplyKind::Greeting,
            },
            ReplyRule {
                pattern: Regex::new(r"\byour name\b")?,
                kind: ReplyKind::Name,
            },
            ReplyRule {
                pattern: Regex::new(
                    r"\b(what time|the time|time is it|what day|what's the date|what is the date|today's date|date today)\b",
                )?,
                kind: ReplyKind::Clock,
            },
            ReplyRule {
                pattern: Regex::new(
                    r"\b(help|advice|advise|suggest\w*|recommend\w*|tips?|ideas?)\b",
                )?,
                kind: ReplyKind::Help,
            },
            ReplyRule {
                pattern: Regex::new(
                    r"\b(plan|plans|planning|schedule|organi[sz]e|agenda|to-?do|priorit\w*)\b",
                )?,
                kind: ReplyKind::Planning,
            },
            ReplyRule {
                pattern: Regex::new(
                    r"\b(tired|exhausted|stress\w*|overwhelm\w*|burn(ed|t)? ?out|burnout|drained|anxious|sleepy)\b",
                )?,
                kind: ReplyKind::Fatigue,
            },
            ReplyRule {
                pattern: Regex::new(
                    r"\b(focus\w*|motivat\w*|procrastinat\w*|distract\w*|concentrat\w*|lazy)\b",
                )?,
                kind: ReplyKind::Focus,
            },
            ReplyRule {
                pattern: Regex::new(r"\b(thanks|thank you|thx|ty|appreciate\w*)\b")?,
                kind: ReplyKind::Gratitude,
            },
            ReplyRule {
                pattern: Regex::new(
                    r"\b(who are you|what are you|are you (a |an )?(bot|robot|human|real|person|ai))\b",
                )?,
                kind: ReplyKind::Identity,
            },
        ];

        Ok(Self {
            agent_name: config.agent_name.clone(),
            classifier: TopicClassifier::new()?,
            themes: ThemeExtractor::new(config)?,
            rules,
        })
    }

    /// Name the agent introduces itself with.
    #[must_use]
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Compose a reply for `conversation`.
    ///
    /// `now` is the local wall-clock reading used by time-of-day replies and
    /// `rng` picks the opening greeting.
    pub fn compose<R>(
        &self,
        conversation: &Conversation,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> ComposedReply
    where
        R: Rng + ?Sized,
    {
        if conversation.is_empty() {
            let greeting = GREETINGS.choose(rng).copied().unwrap_or(GREETINGS[0]);
            return ComposedReply::general(greeting);
        }

        let Some(latest) = conversation.latest_user() else {
            return ComposedReply::general(LISTENING_REPLY);
        };

        let text = latest.content().trim();
        let topic = self.classifier.classify(text);
        if text.is_empty() {
            return ComposedReply {
                reply: TAKE_YOUR_TIME_REPLY.to_string(),
                topic,
            };
        }

        let themes = self.themes.extract(conversation);
        let lowered = text.to_lowercase();

        let reply = self.match_rule(&lowered).map_or_else(
            || {
                debug!(%topic, themes = themes.len(), "no reply rule matched");
                generic_reply(&themes, conversation.has_assistant_turn())
            },
            |kind| {
                debug!(%topic, ?kind, "matched reply rule");
                self.render(kind, now)
            },
        );

        ComposedReply { reply, topic }
    }

    /// First reply rule matching already-lowercased `text`.
    #[must_use]
    pub fn match_rule(&self, text: &str) -> Option<ReplyKind> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(text))
            .map(|rule| rule.kind)
    }

    fn render(&self, kind: ReplyKind, now: NaiveDateTime) -> String {
        let name = &self.agent_name;
        match kind {
            ReplyKind::Greeting => {
                format!("Hey there! I'm {name}. What's on your mind today?")
            }
            ReplyKind::Name => {
                format!("I'm {name}, your friendly chat companion. What should I call you?")
            }
            ReplyKind::Clock => format!(
                "It's {} on {} where I'm running. \
                 Anything you'd like to fit into the rest of your day?",
                now.format("%-I:%M %p"),
                now.format("%A, %B %-d"),
            ),
            ReplyKind::Help => HELP_REPLY.to_string(),
            ReplyKind::Planning => PLANNING_REPLY.to_string(),
            ReplyKind::Fatigue => FATIGUE_REPLY.to_string(),
            ReplyKind::Focus => FOCUS_REPLY.to_string(),
            ReplyKind::Gratitude => GRATITUDE_REPLY.to_string(),
            ReplyKind::Identity => format!(
                "I'm {name}, a small rule-based assistant. \
                 I don't truly understand language, but I'm good at listening for patterns."
            ),
        }
    }
}

fn generic_reply(themes: &[String], continued: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    if continued {
        parts.push("Picking up the thread from before.".to_string());
    }
    if let Some(list) = join_themes(themes) {
        parts.push(format!("I keep hearing about {list}."));
    }
    parts.push("Tell me more. What feels most important to you right now?".to_string());
    parts.join(" ")
}

fn join_themes(themes: &[String]) -> Option<String> {
    let (last, rest) = themes.split_last()?;
    if rest.is_empty() {
        return Some(last.clone());
    }
    Some(format!("{} and {last}", rest.join(", ")))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::chat::message::Message;

    fn composer() -> ReplyComposer {
        ReplyComposer::new(&ChatConfig::default()).unwrap()
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn compose(conversation: &Conversation) -> ComposedReply {
        composer().compose(conversation, noon(), &mut StdRng::seed_from_u64(7))
    }

    fn single(text: &str) -> ComposedReply {
        compose(&vec![Message::user(text)].into())
    }

    #[test]
    fn test_empty_history_greets() {
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = composer().compose(&Conversation::new(), noon(), &mut rng);
            assert_eq!(result.topic, Topic::General);
            assert!(GREETINGS.contains(&result.reply.as_str()));
        }
    }

    #[test]
    fn test_greeting_is_deterministic_for_seed() {
        let composer = composer();
        let empty = Conversation::new();
        let first = composer.compose(&empty, noon(), &mut StdRng::seed_from_u64(42));
        let second = composer.compose(&empty, noon(), &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_assistant_only_history() {
        let result = compose(&vec![Message::assistant("Hi there!")].into());
        assert_eq!(result, ComposedReply::general(LISTENING_REPLY));
    }

    #[test]
    fn test_blank_latest_user_message() {
        let conversation: Conversation = vec![
            Message::user("I need help planning my week"),
            Message::assistant("Sure."),
            Message::user("   \n\t"),
        ]
        .into();
        let result = compose(&conversation);
        assert_eq!(result.reply, TAKE_YOUR_TIME_REPLY);
        assert_eq!(result.topic, Topic::General);
    }

    #[test]
    fn test_name_question() {
        let result = single("What's your name?");
        assert_eq!(result.topic, Topic::General);
        assert!(result.reply.contains("Echo"));

        let custom = ReplyComposer::new(&ChatConfig::new().with_agent_name("Juniper")).unwrap();
        let conversation: Conversation = vec![Message::user("what is your name")].into();
        let result = custom.compose(&conversation, noon(), &mut StdRng::seed_from_u64(1));
        assert!(result.reply.contains("Juniper"));
    }

    #[test]
    fn test_planning_request() {
        let result = single("I need help planning my week");
        assert_eq!(result.topic, Topic::Planning);
        assert_eq!(composer().match_rule("i need help planning my week"), Some(ReplyKind::Help));
    }

    #[test]
    fn test_planning_reply() {
        let result = single("Let's plan the weekend");
        assert_eq!(result.topic, Topic::Planning);
        assert_eq!(result.reply, PLANNING_REPLY);
        assert!(result.reply.starts_with("Let's map it out."));
    }

    #[test]
    fn test_stress_maps_to_mood_and_fatigue() {
        let result = single("I'm exhausted and stressed");
        assert_eq!(result.topic, Topic::Mood);
        assert!(result.reply.starts_with("That sounds heavy."));
    }

    #[test]
    fn test_clock_reply_uses_given_time() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .unwrap();
        let result = composer().compose(
            &vec![Message::user("What time is it?")].into(),
            now,
            &mut StdRng::seed_from_u64(0),
        );
        assert_eq!(result.topic, Topic::Time);
        assert!(result.reply.contains("2:30 PM"));
        assert!(result.reply.contains("Tuesday, March 5"));
    }

    #[test]
    fn test_rule_order() {
        let composer = composer();
        assert_eq!(composer.match_rule("hello, what's your name?"), Some(ReplyKind::Greeting));
        assert_eq!(composer.match_rule("thanks, that helped"), Some(ReplyKind::Gratitude));
        assert_eq!(composer.match_rule("let's plan the weekend"), Some(ReplyKind::Planning));
        assert_eq!(composer.match_rule("i can't focus"), Some(ReplyKind::Focus));
        assert_eq!(composer.match_rule("are you a bot?"), Some(ReplyKind::Identity));
        assert_eq!(composer.match_rule("the weather is nice"), None);
    }

    #[test]
    fn test_identity_reply_names_agent() {
        let result = single("Who are you?");
        assert!(result.reply.contains("Echo"));
        assert!(result.reply.contains("rule-based"));
    }

    #[test]
    fn test_generic_reply_with_themes_and_continuity() {
        let conversation: Conversation = vec![
            Message::user("I love hiking and climbing"),
            Message::assistant("Nice!"),
            Message::user("climbing is fun"),
        ]
        .into();
        let result = compose(&conversation);
        assert_eq!(result.topic, Topic::General);
        assert_eq!(
            result.reply,
            "Picking up the thread from before. I keep hearing about climbing, love and hiking. \
             Tell me more. What feels most important to you right now?"
        );
    }

    #[test]
    fn test_generic_reply_without_themes() {
        let result = single("ok");
        assert_eq!(
            result.reply,
            "Tell me more. What feels most important to you right now?"
        );
    }

    #[test]
    fn test_join_themes() {
        assert_eq!(join_themes(&[]), None);
        assert_eq!(join_themes(&["rust".to_string()]), Some("rust".to_string()));
        assert_eq!(
            join_themes(&["rust".to_string(), "tea".to_string()]),
            Some("rust and tea".to_string())
        );
    }
}
