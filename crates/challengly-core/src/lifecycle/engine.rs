//! Challenge lifecycle engine.
//!
//! Owns today's selection, the per-index state machine and the persisted
//! countdown. It holds no timer of its own: the caller drives `tick()` once
//! per second (see [`super::Countdown`]) and passes the current wall-clock
//! time into every operation.
//!
//! ## State Transitions
//!
//! ```text
//! Revealed --accept--> InProgress --tick(0)--> ReadyToComplete --complete--> Completed
//!                      InProgress --complete-------------------------------> Completed
//! ```
//!
//! Transitions requested from the wrong state return `Ok(None)` and leave
//! storage untouched.
//!
//! ## Usage
//!
//! ```ignore
//! let mut lifecycle = ChallengeLifecycle::new(SqliteStore::open()?, Catalog::builtin());
//! let index = lifecycle.current_index(&clock.now_local())?;
//! let duration = lifecycle.duration_for(index);
//! lifecycle.accept(index, duration, clock.now_ms())?;
//! ```

use chrono::{DateTime, TimeZone};

use super::selection::{self, ViewOverride};
use super::state::{ChallengeState, ChallengeView, TimerRecord};
use crate::catalog::{Catalog, DEFAULT_DURATION_SECS};
use crate::clock::utc_from_ms;
use crate::error::Result;
use crate::events::Event;
use crate::storage::{keys, load_json, save_json, Config, KeyValueStore};

pub struct ChallengeLifecycle<S: KeyValueStore> {
    store: S,
    catalog: Catalog,
    default_duration_secs: u64,
    initial_streak: u64,
}

impl<S: KeyValueStore> ChallengeLifecycle<S> {
    pub fn new(store: S, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            default_duration_secs: DEFAULT_DURATION_SECS,
            initial_streak: 0,
        }
    }

    /// Build from configuration: catalog, fallback duration and initial streak.
    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            catalog: config.catalog(),
            default_duration_secs: config.timer.default_duration_secs,
            initial_streak: config.streak.initial,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Today's index by rotation alone. Pure.
    pub fn select_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> usize {
        selection::select_index(now, self.catalog.len())
    }

    /// The index after `index`, wrapping. Pure: the skipped index keeps its
    /// own stored state.
    pub fn refresh(&self, index: usize) -> usize {
        selection::next_index(index, self.catalog.len())
    }

    /// Countdown length for `index`, resolved from its time label.
    pub fn duration_for(&self, index: usize) -> u64 {
        self.catalog.duration_secs(index, self.default_duration_secs)
    }

    /// Reconstruct the state of `index` at `now_ms`.
    ///
    /// An in-progress record whose time has run out is discarded here and
    /// the state normalized to ready-to-complete, so repeated loads after
    /// expiry are stable.
    pub fn load_state(&mut self, index: usize, now_ms: i64) -> Result<ChallengeView> {
        let stored = self
            .store
            .get(&keys::timer_state(index))?
            .and_then(|raw| ChallengeState::from_stored(&raw));

        let view = |state, remaining_secs| ChallengeView {
            index,
            state,
            remaining_secs,
        };

        match stored {
            Some(ChallengeState::InProgress) => match self.timer_record(index)? {
                Some(record) => match record.remaining_secs(now_ms) {
                    Some(remaining) => Ok(view(ChallengeState::InProgress, Some(remaining))),
                    None => {
                        self.store.delete(&keys::timer_record(index))?;
                        self.persist_state(index, ChallengeState::ReadyToComplete)?;
                        tracing::info!(index, "countdown expired while away");
                        Ok(view(ChallengeState::ReadyToComplete, Some(0)))
                    }
                },
                None => {
                    // No usable record: the countdown cannot be resumed.
                    self.persist_state(index, ChallengeState::Revealed)?;
                    tracing::warn!(index, "in-progress without a timer record, reset to revealed");
                    Ok(view(ChallengeState::Revealed, None))
                }
            },
            Some(ChallengeState::Completed) => Ok(view(ChallengeState::Completed, None)),
            Some(ChallengeState::ReadyToComplete) => {
                Ok(view(ChallengeState::ReadyToComplete, Some(0)))
            }
            _ => Ok(view(ChallengeState::Revealed, None)),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&mut self, index: usize, now_ms: i64) -> Result<Event> {
        let view = self.load_state(index, now_ms)?;
        Ok(Event::StateSnapshot {
            index,
            state: view.state,
            remaining_secs: view.remaining_secs,
            at: utc_from_ms(now_ms),
        })
    }

    /// Current streak, or the configured initial value if none is stored.
    pub fn streak(&self) -> Result<u64> {
        match self.store.get(keys::STREAK_COUNT)? {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) => Ok(n),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparseable streak count");
                    Ok(self.initial_streak)
                }
            },
            None => Ok(self.initial_streak),
        }
    }

    /// The index on display today: a same-day manual refresh if one was
    /// made, otherwise the rotation.
    pub fn current_index<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<usize> {
        let today = now.naive_local().date();
        let overridden = load_json::<_, ViewOverride>(&self.store, keys::VIEW_INDEX)?
            .and_then(|view| view.index_for(today, self.catalog.len()));
        Ok(overridden.unwrap_or_else(|| self.select_today(now)))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. Only valid from `Revealed`.
    pub fn accept(
        &mut self,
        index: usize,
        duration_secs: u64,
        now_ms: i64,
    ) -> Result<Option<Event>> {
        let current = self.load_state(index, now_ms)?;
        if current.state != ChallengeState::Revealed {
            tracing::debug!(index, state = %current.state, "accept ignored");
            return Ok(None);
        }

        let record = TimerRecord {
            start: now_ms,
            duration: duration_secs,
        };
        save_json(&mut self.store, &keys::timer_record(index), &record)?;
        self.persist_state(index, ChallengeState::InProgress)?;
        tracing::info!(index, duration_secs, "challenge accepted");

        Ok(Some(Event::ChallengeAccepted {
            index,
            duration_secs,
            remaining_secs: duration_secs,
            at: utc_from_ms(now_ms),
        }))
    }

    /// Advance the caller's countdown by one second.
    ///
    /// On every tick the stored start is rebased to
    /// `now - (duration - remaining) * 1000` so the record tracks what the
    /// caller displayed. At zero the record is removed and the state moves
    /// to ready-to-complete.
    pub fn tick(
        &mut self,
        index: usize,
        current_remaining: u64,
        now_ms: i64,
    ) -> Result<Option<Event>> {
        let stored = self
            .store
            .get(&keys::timer_state(index))?
            .and_then(|raw| ChallengeState::from_stored(&raw));
        if stored != Some(ChallengeState::InProgress) {
            return Ok(None);
        }
        let Some(record) = self.timer_record(index)? else {
            tracing::debug!(index, "tick ignored: no timer record");
            return Ok(None);
        };

        let remaining = current_remaining.saturating_sub(1);
        if remaining == 0 {
            self.store.delete(&keys::timer_record(index))?;
            self.persist_state(index, ChallengeState::ReadyToComplete)?;
            tracing::info!(index, "countdown finished");
            return Ok(Some(Event::TimerExpired {
                index,
                at: utc_from_ms(now_ms),
            }));
        }

        let record = TimerRecord::rebased(record.duration, remaining, now_ms);
        save_json(&mut self.store, &keys::timer_record(index), &record)?;
        self.persist_state(index, ChallengeState::InProgress)?;
        tracing::debug!(index, remaining, start = record.start, "tick");

        Ok(Some(Event::TimerTicked {
            index,
            remaining_secs: remaining,
            at: utc_from_ms(now_ms),
        }))
    }

    /// Mark the challenge done and bump the streak. Valid from `InProgress`
    /// (early completion) or `ReadyToComplete`.
    pub fn complete(&mut self, index: usize, now_ms: i64) -> Result<Option<Event>> {
        let current = self.load_state(index, now_ms)?;
        if !current.state.can_complete() {
            tracing::debug!(index, state = %current.state, "complete ignored");
            return Ok(None);
        }

        self.store.delete(&keys::timer_record(index))?;
        self.persist_state(index, ChallengeState::Completed)?;
        let streak = self.streak()? + 1;
        self.store.set(keys::STREAK_COUNT, &streak.to_string())?;
        tracing::info!(index, streak, from = %current.state, "challenge completed");

        Ok(Some(Event::ChallengeCompleted {
            index,
            from: current.state,
            streak,
            at: utc_from_ms(now_ms),
        }))
    }

    /// Move today's view to the next index and remember it until midnight.
    pub fn refresh_view<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<Event> {
        let from_index = self.current_index(now)?;
        let to_index = self.refresh(from_index);
        let view = ViewOverride {
            date: now.naive_local().date(),
            index: to_index,
        };
        save_json(&mut self.store, keys::VIEW_INDEX, &view)?;
        tracing::debug!(from_index, to_index, "view refreshed");
        Ok(Event::ChallengeRefreshed {
            from_index,
            to_index,
            at: now.with_timezone(&chrono::Utc),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn timer_record(&mut self, index: usize) -> Result<Option<TimerRecord>> {
        let key = keys::timer_record(index);
        let record = load_json::<_, TimerRecord>(&self.store, &key)?;
        if record.is_none() && self.store.get(&key)?.is_some() {
            // Unparseable record counts as absent.
            self.store.delete(&key)?;
        }
        Ok(record)
    }

    fn persist_state(&mut self, index: usize, state: ChallengeState) -> Result<()> {
        self.store.set(&keys::timer_state(index), state.as_str())?;
        Ok(())
    }
}
