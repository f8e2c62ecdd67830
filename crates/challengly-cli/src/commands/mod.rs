pub mod challenge;
pub mod chat;
pub mod config;
pub mod profile;
pub mod streak;

use challengly_core::{ChallengeLifecycle, Clock, Config, SqliteStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store and wrap it in a lifecycle configured from disk.
pub(crate) fn open_lifecycle(
) -> Result<(ChallengeLifecycle<SqliteStore>, Config), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = SqliteStore::open()?;
    Ok((ChallengeLifecycle::with_config(store, &config), config))
}

/// `--index` if given and valid, otherwise the index on display today.
pub(crate) fn resolve_index(
    lifecycle: &ChallengeLifecycle<SqliteStore>,
    index: Option<usize>,
    clock: &impl Clock,
) -> Result<usize, Box<dyn std::error::Error>> {
    match index {
        Some(index) => {
            lifecycle.catalog().challenge(index)?;
            Ok(index)
        }
        None => Ok(lifecycle.current_index(&clock.now_local())?),
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
