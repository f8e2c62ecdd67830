use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::ChallengeState;

/// Every lifecycle transition produces an Event.
/// The CLI prints them as JSON; a GUI would render from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ChallengeAccepted {
        index: usize,
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero; the challenge is ready to complete.
    TimerExpired {
        index: usize,
        at: DateTime<Utc>,
    },
    ChallengeCompleted {
        index: usize,
        /// State the challenge was completed from.
        from: ChallengeState,
        streak: u64,
        at: DateTime<Utc>,
    },
    ChallengeRefreshed {
        from_index: usize,
        to_index: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        index: usize,
        state: ChallengeState,
        remaining_secs: Option<u64>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Catalog index the event refers to (the destination for refreshes).
    pub fn index(&self) -> usize {
        match self {
            Event::ChallengeAccepted { index, .. }
            | Event::TimerTicked { index, .. }
            | Event::TimerExpired { index, .. }
            | Event::ChallengeCompleted { index, .. }
            | Event::StateSnapshot { index, .. } => *index,
            Event::ChallengeRefreshed { to_index, .. } => *to_index,
        }
    }
}
