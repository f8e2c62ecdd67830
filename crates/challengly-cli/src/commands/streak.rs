use challengly_core::storage::keys;
use challengly_core::{Clock, SystemClock};
use serde_json::json;

use super::{open_lifecycle, print_json, CliResult};

/// Print the completion streak and a per-challenge state summary.
pub fn run() -> CliResult {
    let (mut lifecycle, _) = open_lifecycle()?;
    let clock = SystemClock;
    let now_ms = clock.now_ms();

    let mut tracked: Vec<usize> = lifecycle
        .store()
        .keys_with_prefix(keys::TIMER_STATE_PREFIX)?
        .iter()
        .filter_map(|key| keys::index_of_timer_state(key))
        .collect();
    tracked.sort_unstable();

    let mut challenges = Vec::with_capacity(lifecycle.catalog().len());
    for index in 0..lifecycle.catalog().len() {
        let view = lifecycle.load_state(index, now_ms)?;
        challenges.push(json!({
            "index": index,
            "state": view.state,
            "remaining_secs": view.remaining_secs,
        }));
    }

    print_json(&json!({
        "streak": lifecycle.streak()?,
        "today": lifecycle.current_index(&clock.now_local())?,
        "tracked": tracked,
        "challenges": challenges,
    }))
}
