//! Wall-clock sources.
//!
//! All lifecycle arithmetic is done in epoch milliseconds. Callers pass the
//! current time in explicitly; the CLI reads it from a [`Clock`].

use std::cell::Cell;

use chrono::{DateTime, Local, TimeZone, Utc};

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;

    /// Current time in the local timezone.
    fn now_local(&self) -> DateTime<Local> {
        Local
            .timestamp_millis_opt(self.now_ms())
            .single()
            .unwrap_or_else(Local::now)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn now_local(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<i64>,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance_ms(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

/// Convert epoch milliseconds into a UTC timestamp for events.
pub(crate) fn utc_from_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(1_000);
        clock.advance_secs(2);
        clock.advance_ms(5);
        assert_eq!(clock.now_ms(), 3_005);
        clock.set(0);
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn utc_conversion() {
        assert_eq!(utc_from_ms(0).timestamp(), 0);
        assert_eq!(utc_from_ms(86_400_000).timestamp(), 86_400);
    }
}
