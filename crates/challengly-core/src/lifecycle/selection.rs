//! Day-of-year challenge rotation.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: i64 = 86_400_000;

/// Whole days elapsed since Jan 1 of `now`'s year, in `now`'s own calendar.
///
/// The difference is taken between local wall-clock readings, so a DST
/// shift never moves a moment into the previous day.
pub fn day_of_year<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    let local = now.naive_local();
    let jan1 = NaiveDate::from_ymd_opt(local.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    match jan1 {
        Some(jan1) => (local - jan1).num_milliseconds().div_euclid(MS_PER_DAY) as u32,
        None => local.ordinal0(),
    }
}

/// `day_of_year(now) mod catalog_len`. `catalog_len` must be non-zero.
pub fn select_index<Tz: TimeZone>(now: &DateTime<Tz>, catalog_len: usize) -> usize {
    day_of_year(now) as usize % catalog_len
}

/// The index after `index`, wrapping around.
pub fn next_index(index: usize, catalog_len: usize) -> usize {
    (index + 1) % catalog_len
}

/// A manual refresh that overrides the rotation for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOverride {
    pub date: NaiveDate,
    pub index: usize,
}

impl ViewOverride {
    /// The overridden index if it applies to `today` and fits the catalog.
    pub fn index_for(&self, today: NaiveDate, catalog_len: usize) -> Option<usize> {
        (self.date == today && self.index < catalog_len).then_some(self.index)
    }
}
