//! Storage key layout.
//!
//! Challenge state is namespaced by catalog index, not by calendar date, so
//! an index that rotates back into view resumes whatever it was left at.

/// Global streak counter (decimal integer).
pub const STREAK_COUNT: &str = "streak_count";

/// Assistant response cursor (JSON map of category to next position).
pub const CHAT_CURSOR: &str = "chat_cursor";

/// Onboarding profile (JSON).
pub const PROFILE: &str = "profile";

/// Manually refreshed view for the current day (JSON).
pub const VIEW_INDEX: &str = "view_index";

pub const TIMER_STATE_PREFIX: &str = "timer_state_";

/// `revealed | in-progress | ready-to-complete | completed`
pub fn timer_state(index: usize) -> String {
    format!("{TIMER_STATE_PREFIX}{index}")
}

/// Catalog index encoded in a `timer_state_<i>` key.
pub fn index_of_timer_state(key: &str) -> Option<usize> {
    key.strip_prefix(TIMER_STATE_PREFIX)?.parse().ok()
}

/// `{"start": <epoch ms>, "duration": <seconds>}`
pub fn timer_record(index: usize) -> String {
    format!("timer_record_{index}")
}

pub fn chat_transcript(index: usize) -> String {
    format!("chat_transcript_{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_index_keys() {
        assert_eq!(timer_state(2), "timer_state_2");
        assert_eq!(timer_record(0), "timer_record_0");
        assert_eq!(chat_transcript(1), "chat_transcript_1");
    }

    #[test]
    fn index_from_state_key() {
        assert_eq!(index_of_timer_state(&timer_state(12)), Some(12));
        assert_eq!(index_of_timer_state("timer_record_3"), None);
        assert_eq!(index_of_timer_state("timer_state_x"), None);
    }
}
