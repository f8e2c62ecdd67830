//! Integration tests for the challenge lifecycle across simulated reloads.
//!
//! Each "reload" drops the lifecycle and reopens the same SQLite file, so
//! nothing survives except what was persisted.

use std::path::Path;

use challengly_core::{
    Catalog, ChallengeLifecycle, ChallengeState, Clock, Event, KeyValueStore, ManualClock,
    SqliteStore, TimerRecord,
};

const T0: i64 = 1_760_000_000_000;

fn open(path: &Path) -> ChallengeLifecycle<SqliteStore> {
    ChallengeLifecycle::new(SqliteStore::open_at(path).unwrap(), Catalog::builtin())
}

#[test]
fn accept_then_reload_resumes_in_progress() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("challengly.db");

    open(&db).accept(0, 100, T0).unwrap().unwrap();

    let mut reloaded = open(&db);
    let view = reloaded.load_state(0, T0).unwrap();
    assert_eq!(view.state, ChallengeState::InProgress);
    assert_eq!(view.remaining_secs, Some(100));
}

#[test]
fn elapsed_time_is_reconstructed_from_start() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("challengly.db");

    open(&db).accept(1, 100, T0).unwrap();

    // App was backgrounded for 40 seconds without ticking.
    let view = open(&db).load_state(1, T0 + 40_000).unwrap();
    assert_eq!(view.state, ChallengeState::InProgress);
    assert_eq!(view.remaining_secs, Some(60));

    // Partial seconds floor.
    let view = open(&db).load_state(1, T0 + 40_999).unwrap();
    assert_eq!(view.remaining_secs, Some(60));
}

#[test]
fn expiry_while_away_is_normalized_once() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("challengly.db");

    open(&db).accept(2, 10, T0).unwrap();

    for offset in [15_000, 16_000, 600_000] {
        let mut lifecycle = open(&db);
        let view = lifecycle.load_state(2, T0 + offset).unwrap();
        assert_eq!(view.state, ChallengeState::ReadyToComplete);
        assert_eq!(view.remaining_secs, Some(0));
        assert!(lifecycle.store().get("timer_record_2").unwrap().is_none());
        assert_eq!(
            lifecycle.store().get("timer_state_2").unwrap().as_deref(),
            Some("ready-to-complete")
        );
    }
}

#[test]
fn expiry_exactly_at_duration() {
    let mut lifecycle = ChallengeLifecycle::new(challengly_core::MemoryStore::new(), Catalog::builtin());
    lifecycle.accept(0, 10, T0).unwrap();
    assert_eq!(lifecycle.load_state(0, T0 + 9_999).unwrap().remaining_secs, Some(1));
    assert_eq!(
        lifecycle.load_state(0, T0 + 10_000).unwrap().state,
        ChallengeState::ReadyToComplete
    );
}

#[test]
fn completion_clears_timer_and_persists_streak() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("challengly.db");

    let mut lifecycle = open(&db);
    lifecycle.accept(0, 100, T0).unwrap();
    let event = lifecycle.complete(0, T0 + 5).unwrap().unwrap();
    assert!(matches!(event, Event::ChallengeCompleted { streak: 1, .. }));
    drop(lifecycle);

    let mut reloaded = open(&db);
    let view = reloaded.load_state(0, T0 + 10_000).unwrap();
    assert_eq!(view.state, ChallengeState::Completed);
    assert_eq!(view.remaining_secs, None);
    assert!(reloaded.store().get("timer_record_0").unwrap().is_none());
    assert_eq!(reloaded.streak().unwrap(), 1);
}

#[test]
fn ticking_keeps_the_stored_start_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("challengly.db");
    let clock = ManualClock::new(T0);

    let mut lifecycle = open(&db);
    lifecycle.accept(0, 30, clock.now_ms()).unwrap();

    let mut remaining = 30;
    for _ in 0..10 {
        clock.advance_secs(1);
        match lifecycle.tick(0, remaining, clock.now_ms()).unwrap() {
            Some(Event::TimerTicked { remaining_secs, .. }) => remaining = remaining_secs,
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(remaining, 20);
    drop(lifecycle);

    let raw = SqliteStore::open_at(&db)
        .unwrap()
        .get("timer_record_0")
        .unwrap()
        .unwrap();
    let record: TimerRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(record.start, T0);
    assert_eq!(record.duration, 30);

    // A reload right now agrees with the in-memory countdown.
    let view = open(&db).load_state(0, clock.now_ms()).unwrap();
    assert_eq!(view.remaining_secs, Some(20));
}

#[test]
fn full_run_to_completion() {
    let clock = ManualClock::new(T0);
    let mut lifecycle =
        ChallengeLifecycle::new(challengly_core::MemoryStore::new(), Catalog::builtin());

    lifecycle.accept(1, 3, clock.now_ms()).unwrap();
    let mut remaining = 3;
    let mut expired = false;
    while !expired {
        clock.advance_secs(1);
        match lifecycle.tick(1, remaining, clock.now_ms()).unwrap() {
            Some(Event::TimerTicked { remaining_secs, .. }) => remaining = remaining_secs,
            Some(Event::TimerExpired { .. }) => expired = true,
            other => panic!("unexpected {other:?}"),
        }
    }

    let view = lifecycle.load_state(1, clock.now_ms()).unwrap();
    assert_eq!(view.state, ChallengeState::ReadyToComplete);
    let event = lifecycle.complete(1, clock.now_ms()).unwrap().unwrap();
    assert!(matches!(
        event,
        Event::ChallengeCompleted { from: ChallengeState::ReadyToComplete, .. }
    ));
}

#[test]
fn states_are_independent_per_index() {
    let mut lifecycle =
        ChallengeLifecycle::new(challengly_core::MemoryStore::new(), Catalog::builtin());
    lifecycle.accept(0, 100, T0).unwrap();
    lifecycle.accept(1, 50, T0).unwrap();
    lifecycle.complete(1, T0 + 1_000).unwrap();

    assert_eq!(lifecycle.load_state(0, T0 + 1_000).unwrap().state, ChallengeState::InProgress);
    assert_eq!(lifecycle.load_state(1, T0 + 1_000).unwrap().state, ChallengeState::Completed);
    assert_eq!(lifecycle.load_state(2, T0 + 1_000).unwrap().state, ChallengeState::Revealed);
}
