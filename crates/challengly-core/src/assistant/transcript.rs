use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::classifier::ResponseCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp,
        }
    }
}

/// Quick-reply chips offered under the conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSet {
    #[default]
    Initial,
    During,
    Completed,
}

impl SuggestionSet {
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            SuggestionSet::Initial => &[
                "What's today's challenge?",
                "I need motivation",
                "Give me tips",
                "I'm nervous",
            ],
            SuggestionSet::During => &[
                "This is hard!",
                "I'm making progress",
                "Need a break",
                "Almost done!",
            ],
            SuggestionSet::Completed => &[
                "I finished!",
                "It was easier than expected",
                "That was tough",
                "Ready for tomorrow",
            ],
        }
    }

    /// Set shown after replying in `category`; other categories keep `self`.
    pub fn after(self, category: ResponseCategory) -> Self {
        match category {
            ResponseCategory::ChallengeInfo => SuggestionSet::During,
            ResponseCategory::Reflection => SuggestionSet::Completed,
            _ => self,
        }
    }
}

/// Conversation for one challenge index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub suggestions: SuggestionSet,
}

impl Transcript {
    /// A new conversation opened by the assistant's greeting.
    pub fn seeded(at: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage::new(
                Sender::Ai,
                ResponseCategory::Greeting.responses()[0],
                at,
            )],
            suggestions: SuggestionSet::Initial,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_greeting() {
        let transcript = Transcript::seeded(Utc::now());
        assert_eq!(transcript.len(), 1);
        let first = transcript.last().unwrap();
        assert_eq!(first.sender, Sender::Ai);
        assert!(first.content.starts_with("Hi there!"));
        assert_eq!(transcript.suggestions, SuggestionSet::Initial);
    }

    #[test]
    fn suggestions_follow_conversation() {
        let set = SuggestionSet::Initial;
        assert_eq!(set.after(ResponseCategory::Tips), SuggestionSet::Initial);
        let set = set.after(ResponseCategory::ChallengeInfo);
        assert_eq!(set, SuggestionSet::During);
        assert_eq!(set.after(ResponseCategory::Fallback), SuggestionSet::During);
        assert_eq!(set.after(ResponseCategory::Reflection), SuggestionSet::Completed);
    }

    #[test]
    fn message_ids_are_unique() {
        let at = Utc::now();
        let a = ChatMessage::new(Sender::User, "a", at);
        let b = ChatMessage::new(Sender::User, "a", at);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn transcript_without_suggestions_field_parses() {
        let json = r#"{"messages":[{"id":"1","content":"hey","sender":"user","timestamp":"2026-01-01T00:00:00Z"}]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.suggestions, SuggestionSet::Initial);
        assert_eq!(transcript.messages[0].sender, Sender::User);
    }
}
