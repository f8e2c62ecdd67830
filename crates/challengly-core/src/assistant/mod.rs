//! Scripted chat assistant.
//!
//! Replies come from a fixed table keyed by keyword classification, cycled
//! per category. The conversation is kept per challenge index; the reply
//! cursor is shared across indices.

mod classifier;
mod transcript;

pub use classifier::{classify, ResponseCategory, ResponseCursor};
pub use transcript::{ChatMessage, Sender, SuggestionSet, Transcript};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{keys, load_json, save_json, KeyValueStore};

/// Result of sending one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub category: ResponseCategory,
    pub message: ChatMessage,
    pub suggestions: SuggestionSet,
}

pub struct Assistant<S: KeyValueStore> {
    store: S,
    index: usize,
}

impl<S: KeyValueStore> Assistant<S> {
    /// Assistant bound to the conversation of challenge `index`.
    pub fn new(store: S, index: usize) -> Self {
        Self { store, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Stored conversation, or a freshly seeded one if none (or an
    /// unreadable one) is stored.
    pub fn transcript(&self, now: DateTime<Utc>) -> Result<Transcript> {
        let stored = load_json::<_, Transcript>(&self.store, &keys::chat_transcript(self.index))?;
        Ok(stored.unwrap_or_else(|| Transcript::seeded(now)))
    }

    pub fn suggestions(&self, now: DateTime<Utc>) -> Result<SuggestionSet> {
        Ok(self.transcript(now)?.suggestions)
    }

    /// Record `content` from the user and append the assistant's reply.
    ///
    /// # Errors
    /// Returns a validation error for blank messages.
    pub fn send(&mut self, content: &str, now: DateTime<Utc>) -> Result<Reply> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "message".into(),
                message: "message is empty".into(),
            }
            .into());
        }

        let mut transcript = self.transcript(now)?;
        transcript.push(ChatMessage::new(Sender::User, content, now));

        let category = classify(content);
        let mut cursor =
            load_json::<_, ResponseCursor>(&self.store, keys::CHAT_CURSOR)?.unwrap_or_default();
        let reply = ChatMessage::new(Sender::Ai, cursor.next_response(category), now);
        transcript.push(reply.clone());
        transcript.suggestions = transcript.suggestions.after(category);

        save_json(&mut self.store, keys::CHAT_CURSOR, &cursor)?;
        save_json(&mut self.store, &keys::chat_transcript(self.index), &transcript)?;
        tracing::debug!(index = self.index, category = category.as_str(), "assistant replied");

        Ok(Reply {
            category,
            message: reply,
            suggestions: transcript.suggestions,
        })
    }

    /// Forget the conversation for this index.
    pub fn clear(&mut self) -> Result<()> {
        self.store.delete(&keys::chat_transcript(self.index))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn send_appends_user_and_reply() {
        let mut assistant = Assistant::new(MemoryStore::new(), 0);
        let now = Utc::now();
        let reply = assistant.send("What's today's challenge?", now).unwrap();
        assert_eq!(reply.category, ResponseCategory::ChallengeInfo);
        assert_eq!(reply.suggestions, SuggestionSet::During);

        let transcript = assistant.transcript(now).unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages[1].sender, Sender::User);
        assert_eq!(transcript.messages[2], reply.message);
    }

    #[test]
    fn cursor_survives_new_assistant() {
        let mut store = MemoryStore::new();
        let now = Utc::now();
        let first = Assistant::new(&mut store, 0).send("hello", now).unwrap();
        let second = Assistant::new(&mut store, 1).send("hey", now).unwrap();
        assert_ne!(first.message.content, second.message.content);
        assert_eq!(
            second.message.content,
            ResponseCategory::Greeting.responses()[1]
        );
    }

    #[test]
    fn blank_message_rejected() {
        let mut assistant = Assistant::new(MemoryStore::new(), 0);
        assert!(assistant.send("   ", Utc::now()).is_err());
    }

    #[test]
    fn corrupt_transcript_resets_to_seed() {
        let mut store = MemoryStore::new();
        store.set("chat_transcript_0", "[oops").unwrap();
        let assistant = Assistant::new(store, 0);
        let transcript = assistant.transcript(Utc::now()).unwrap();
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn clear_forgets_conversation() {
        let mut assistant = Assistant::new(MemoryStore::new(), 2);
        let now = Utc::now();
        assistant.send("I finished!", now).unwrap();
        assistant.clear().unwrap();
        assert_eq!(assistant.transcript(now).unwrap().len(), 1);
    }
}
