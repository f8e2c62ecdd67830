//! # Challengly Core Library
//!
//! This library provides the core logic for Challengly, a daily challenge
//! app. All operations are available through the standalone CLI binary;
//! any GUI is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Lifecycle**: Per-index challenge state machine with a countdown that
//!   is reconstructed from an absolute start timestamp, so reloads and
//!   suspension never lose time
//! - **Storage**: A key/value abstraction with in-memory and SQLite
//!   backends, plus TOML configuration
//! - **Assistant**: Keyword-classified canned chat replies
//!
//! ## Key Components
//!
//! - [`ChallengeLifecycle`]: Selection and state transitions
//! - [`Countdown`]: Cancellable one-second ticker
//! - [`KeyValueStore`]: Storage seam used by every stateful module
//! - [`Config`]: Application configuration management

pub mod assistant;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod profile;
pub mod storage;

pub use assistant::{Assistant, ChatMessage, Reply, ResponseCategory, Sender, SuggestionSet};
pub use catalog::{format_clock, parse_duration_secs, Catalog, Challenge, Difficulty};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use lifecycle::{
    ChallengeLifecycle, ChallengeState, ChallengeView, Countdown, CountdownHandle, TimerRecord,
};
pub use profile::Profile;
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
