use serde::{Deserialize, Serialize};

/// Per-index challenge state.
///
/// ```text
/// Revealed -> InProgress -> ReadyToComplete -> Completed
///             InProgress ---------------------> Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeState {
    /// Defined but never entered.
    Locked,
    Revealed,
    InProgress,
    ReadyToComplete,
    Completed,
}

impl ChallengeState {
    /// The exact string persisted under `timer_state_{i}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeState::Locked => "locked",
            ChallengeState::Revealed => "revealed",
            ChallengeState::InProgress => "in-progress",
            ChallengeState::ReadyToComplete => "ready-to-complete",
            ChallengeState::Completed => "completed",
        }
    }

    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "locked" => Some(ChallengeState::Locked),
            "revealed" => Some(ChallengeState::Revealed),
            "in-progress" => Some(ChallengeState::InProgress),
            "ready-to-complete" => Some(ChallengeState::ReadyToComplete),
            "completed" => Some(ChallengeState::Completed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ChallengeState::Completed)
    }

    /// Whether `complete` is accepted from this state.
    pub fn can_complete(&self) -> bool {
        matches!(
            self,
            ChallengeState::InProgress | ChallengeState::ReadyToComplete
        )
    }
}

impl std::fmt::Display for ChallengeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted countdown anchor.
///
/// Elapsed time is always reconstructed from the absolute `start`, never
/// from a running counter, so suspension gaps are accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    /// Epoch milliseconds.
    pub start: i64,
    /// Seconds.
    pub duration: u64,
}

impl TimerRecord {
    /// Whole seconds elapsed since `start`, floored. Never negative.
    pub fn elapsed_secs(&self, now_ms: i64) -> u64 {
        let delta = now_ms.saturating_sub(self.start);
        if delta <= 0 {
            0
        } else {
            (delta / 1000) as u64
        }
    }

    /// Seconds left at `now_ms`, or `None` once the countdown has run out.
    pub fn remaining_secs(&self, now_ms: i64) -> Option<u64> {
        let elapsed = self.elapsed_secs(now_ms);
        (elapsed < self.duration).then(|| self.duration - elapsed)
    }

    /// Anchor that makes `remaining` seconds left at `now_ms`.
    pub fn rebased(duration: u64, remaining: u64, now_ms: i64) -> Self {
        let elapsed_ms = duration.saturating_sub(remaining).saturating_mul(1000);
        let elapsed_ms = i64::try_from(elapsed_ms).unwrap_or(i64::MAX);
        Self {
            start: now_ms.saturating_sub(elapsed_ms),
            duration,
        }
    }
}

/// What the presentation layer renders for one catalog index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeView {
    pub index: usize,
    pub state: ChallengeState,
    /// `Some` while in progress or ready to complete, `None` otherwise.
    pub remaining_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_strings_round_trip() {
        for state in [
            ChallengeState::Locked,
            ChallengeState::Revealed,
            ChallengeState::InProgress,
            ChallengeState::ReadyToComplete,
            ChallengeState::Completed,
        ] {
            assert_eq!(ChallengeState::from_stored(state.as_str()), Some(state));
        }
        assert_eq!(ChallengeState::from_stored("In-Progress"), None);
    }

    #[test]
    fn record_json_shape() {
        let record = TimerRecord {
            start: 1_700_000_000_000,
            duration: 1800,
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"start":1700000000000,"duration":1800}"#
        );
    }

    #[test]
    fn elapsed_floors_and_clamps() {
        let record = TimerRecord {
            start: 10_000,
            duration: 100,
        };
        assert_eq!(record.elapsed_secs(10_999), 0);
        assert_eq!(record.elapsed_secs(11_000), 1);
        // Clock moved backwards.
        assert_eq!(record.elapsed_secs(5_000), 0);
        assert_eq!(record.remaining_secs(50_000), Some(60));
        assert_eq!(record.remaining_secs(110_000), None);
    }

    #[test]
    fn rebased_start() {
        let record = TimerRecord::rebased(100, 70, 1_000_000);
        assert_eq!(record.start, 970_000);
        assert_eq!(record.remaining_secs(1_000_000), Some(70));
    }
}
