//! Challenge catalog.
//!
//! A fixed, ordered, read-only list of challenges. Selection and state are
//! keyed by position in this list.

mod duration;

pub use duration::{format_clock, parse_duration_secs, DEFAULT_DURATION_SECS};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Rough time range shown during onboarding.
    pub fn time_hint(&self) -> &'static str {
        match self {
            Difficulty::Easy => "5-15 min",
            Difficulty::Medium => "15-30 min",
            Difficulty::Hard => "30+ min",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::InvalidValue {
                field: "difficulty".into(),
                message: format!("expected easy, medium or hard, got '{s}'"),
            }),
        }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Free-text label such as "30 minutes".
    pub estimated_time: String,
    pub difficulty: Difficulty,
    pub category: String,
}

impl Challenge {
    /// Countdown length derived from `estimated_time`.
    pub fn duration_secs(&self, default_secs: u64) -> u64 {
        parse_duration_secs(&self.estimated_time, default_secs)
    }
}

/// Non-empty ordered list of challenges.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    challenges: Vec<Challenge>,
}

impl Catalog {
    /// # Errors
    /// Returns an error if `challenges` is empty.
    pub fn new(challenges: Vec<Challenge>) -> Result<Self, ValidationError> {
        if challenges.is_empty() {
            return Err(ValidationError::EmptyCollection("catalog".into()));
        }
        Ok(Self { challenges })
    }

    /// The challenges shipped with the app.
    pub fn builtin() -> Self {
        Self {
            challenges: vec![
                Challenge {
                    id: 1,
                    title: "Learn a New Language".into(),
                    description: "Start your language learning journey today! Choose a language \
                                  that excites you and dive into a beginner lesson to learn basic \
                                  greetings and common phrases."
                        .into(),
                    estimated_time: "30 minutes".into(),
                    difficulty: Difficulty::Easy,
                    category: "learning".into(),
                },
                Challenge {
                    id: 2,
                    title: "30-Minute Creative Writing".into(),
                    description: "Write a short story, poem, or journal entry for 30 minutes. \
                                  Let your creativity flow without judgment."
                        .into(),
                    estimated_time: "30 minutes".into(),
                    difficulty: Difficulty::Medium,
                    category: "creativity".into(),
                },
                Challenge {
                    id: 3,
                    title: "Mindful Morning Meditation".into(),
                    description: "Begin your day with a 0.5-minute guided meditation focusing \
                                  on breath awareness and mindfulness."
                        .into(),
                    estimated_time: "0.5 minutes".into(),
                    difficulty: Difficulty::Easy,
                    category: "mindfulness".into(),
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Challenge> {
        self.challenges.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.iter()
    }

    /// Look up `index`, reporting out-of-range indices as a validation error.
    pub fn challenge(&self, index: usize) -> Result<&Challenge, ValidationError> {
        self.challenges
            .get(index)
            .ok_or_else(|| ValidationError::OutOfBounds {
                collection: "catalog".into(),
                index,
                len: self.challenges.len(),
            })
    }

    /// Countdown length for the challenge at `index`, or `default_secs` if
    /// the index is out of range.
    pub fn duration_secs(&self, index: usize, default_secs: u64) -> u64 {
        self.get(index)
            .map(|c| c.duration_secs(default_secs))
            .unwrap_or(default_secs)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
