//! Keyword classification and canned replies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Greeting,
    ChallengeInfo,
    Motivation,
    Tips,
    Reflection,
    Fallback,
}

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 6] = [
        ResponseCategory::Greeting,
        ResponseCategory::ChallengeInfo,
        ResponseCategory::Motivation,
        ResponseCategory::Tips,
        ResponseCategory::Reflection,
        ResponseCategory::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCategory::Greeting => "greeting",
            ResponseCategory::ChallengeInfo => "challenge_info",
            ResponseCategory::Motivation => "motivation",
            ResponseCategory::Tips => "tips",
            ResponseCategory::Reflection => "reflection",
            ResponseCategory::Fallback => "fallback",
        }
    }

    /// Canned replies, cycled in order.
    pub fn responses(&self) -> &'static [&'static str] {
        match self {
            ResponseCategory::Greeting => &[
                "Hi there! I'm your Challenge Assistant. Ready to tackle today's challenge? 💪",
                "Hello! How can I help you with your challenge today?",
                "Hey! Great to see you back. What's on your mind?",
            ],
            ResponseCategory::ChallengeInfo => &[
                "Today's challenge is to learn a new language! Start with basic greetings and common phrases. It's estimated to take about 30 minutes.",
                "Your current challenge focuses on language learning. Pick a language that excites you and dive into a beginner lesson!",
            ],
            ResponseCategory::Motivation => &[
                "You've got this! Every expert was once a beginner. Take it one step at a time! 🌟",
                "Amazing streak! 🔥 Keep up the momentum - you're doing incredible!",
                "Remember, the goal isn't perfection, it's progress. You're already winning by trying!",
            ],
            ResponseCategory::Tips => &[
                "Start with just 5 minutes if you're feeling overwhelmed. Small steps lead to big changes!",
                "Try using a language learning app like Duolingo or Babbel for structured lessons.",
                "Focus on pronunciation - don't worry about perfect grammar at first!",
            ],
            ResponseCategory::Reflection => &[
                "How did that feel? What was the most challenging part?",
                "What surprised you most about today's challenge?",
                "On a scale of 1-10, how confident do you feel about continuing tomorrow?",
            ],
            ResponseCategory::Fallback => &[
                "That's interesting! Can you tell me more about what you're thinking?",
                "I want to make sure I understand correctly. Could you rephrase that?",
                "Let me help you with that. What specific aspect would you like to explore?",
            ],
        }
    }
}

/// Ordered keyword rules; the first matching rule wins.
///
/// Matching is plain substring search on the lowercased message, so "hi"
/// also matches inside "this" or "think".
pub fn classify(message: &str) -> ResponseCategory {
    let lower = message.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("hello") || has("hi") || has("hey") {
        ResponseCategory::Greeting
    } else if has("challenge") && (has("what") || has("today")) {
        ResponseCategory::ChallengeInfo
    } else if has("nervous") || has("scared") || has("help") || has("motivation") {
        ResponseCategory::Motivation
    } else if has("tip") || has("how") || has("start") {
        ResponseCategory::Tips
    } else if has("finished") || has("done") || has("completed") {
        ResponseCategory::Reflection
    } else {
        ResponseCategory::Fallback
    }
}

/// Round-robin position per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCursor {
    positions: HashMap<ResponseCategory, usize>,
}

impl ResponseCursor {
    /// Return the next reply for `category` and advance its position.
    pub fn next_response(&mut self, category: ResponseCategory) -> &'static str {
        let responses = category.responses();
        let position = self.positions.entry(category).or_insert(0);
        let reply = responses[*position % responses.len()];
        *position += 1;
        reply
    }

    pub fn position(&self, category: ResponseCategory) -> usize {
        self.positions.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_apply_in_order() {
        assert_eq!(classify("Hello!"), ResponseCategory::Greeting);
        assert_eq!(classify("What's today's challenge?"), ResponseCategory::ChallengeInfo);
        assert_eq!(classify("I'm nervous"), ResponseCategory::Motivation);
        assert_eq!(classify("Give me tips"), ResponseCategory::Tips);
        assert_eq!(classify("I finished!"), ResponseCategory::Reflection);
        assert_eq!(classify("Almost done!"), ResponseCategory::Reflection);
        assert_eq!(classify("Need a break"), ResponseCategory::Fallback);
    }

    #[test]
    fn substring_matching_is_greedy() {
        // "this" contains "hi".
        assert_eq!(classify("This is hard!"), ResponseCategory::Greeting);
        // Motivation is checked before tips.
        assert_eq!(classify("How do I start? Help!"), ResponseCategory::Motivation);
    }

    #[test]
    fn cursor_cycles_per_category() {
        let mut cursor = ResponseCursor::default();
        let first = cursor.next_response(ResponseCategory::ChallengeInfo);
        let second = cursor.next_response(ResponseCategory::ChallengeInfo);
        let third = cursor.next_response(ResponseCategory::ChallengeInfo);
        assert_ne!(first, second);
        assert_eq!(first, third);
        assert_eq!(cursor.position(ResponseCategory::ChallengeInfo), 3);
        assert_eq!(cursor.position(ResponseCategory::Tips), 0);
        assert_eq!(
            cursor.next_response(ResponseCategory::Tips),
            ResponseCategory::Tips.responses()[0]
        );
    }

    #[test]
    fn cursor_json_round_trip() {
        let mut cursor = ResponseCursor::default();
        cursor.next_response(ResponseCategory::Greeting);
        let json = serde_json::to_string(&cursor).unwrap();
        assert!(json.contains("\"greeting\":1"));
        let back: ResponseCursor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cursor);
    }

    #[test]
    fn every_category_has_replies() {
        for category in ResponseCategory::ALL {
            assert!(!category.responses().is_empty(), "{}", category.as_str());
        }
    }
}
