use std::time::Duration;

use clap::Subcommand;
use challengly_core::{
    format_clock, ChallengeLifecycle, ChallengeState, Clock, Config, Countdown, Event,
    SqliteStore, SystemClock,
};
use serde_json::json;

use super::{open_lifecycle, print_json, resolve_index, CliResult};

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Show today's challenge and its state
    Today,
    /// List the whole catalog
    List,
    /// Print the state of a challenge as JSON
    Status {
        /// Catalog index (defaults to today's)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Accept the challenge and start its countdown
    Accept {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Mark the challenge as complete
    Complete {
        #[arg(long)]
        index: Option<usize>,
    },
    /// Skip to the next challenge for the rest of today
    Refresh,
    /// Run the countdown in the foreground until it finishes
    Watch {
        #[arg(long)]
        index: Option<usize>,
    },
}

pub fn run(action: ChallengeAction) -> CliResult {
    let (mut lifecycle, config) = open_lifecycle()?;
    let clock = SystemClock;

    match action {
        ChallengeAction::Today => {
            let index = resolve_index(&lifecycle, None, &clock)?;
            print_today(&mut lifecycle, index, &clock)?;
        }
        ChallengeAction::List => {
            let today = lifecycle.current_index(&clock.now_local())?;
            let entries: Vec<_> = lifecycle
                .catalog()
                .iter()
                .enumerate()
                .map(|(index, challenge)| {
                    json!({
                        "index": index,
                        "today": index == today,
                        "challenge": challenge,
                    })
                })
                .collect();
            print_json(&entries)?;
        }
        ChallengeAction::Status { index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            print_json(&lifecycle.snapshot(index, clock.now_ms())?)?;
        }
        ChallengeAction::Accept { index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            let duration = lifecycle.duration_for(index);
            match lifecycle.accept(index, duration, clock.now_ms())? {
                Some(event) => print_json(&event)?,
                None => report_ignored(&mut lifecycle, index, "accept", &clock)?,
            }
        }
        ChallengeAction::Complete { index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            match lifecycle.complete(index, clock.now_ms())? {
                Some(event) => print_json(&event)?,
                None => report_ignored(&mut lifecycle, index, "complete", &clock)?,
            }
        }
        ChallengeAction::Refresh => {
            let event = lifecycle.refresh_view(&clock.now_local())?;
            let index = event.index();
            print_json(&event)?;
            print_today(&mut lifecycle, index, &clock)?;
        }
        ChallengeAction::Watch { index } => {
            let index = resolve_index(&lifecycle, index, &clock)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(watch(&mut lifecycle, &config, index, &clock))?;
        }
    }
    Ok(())
}

fn print_today(
    lifecycle: &mut ChallengeLifecycle<SqliteStore>,
    index: usize,
    clock: &impl Clock,
) -> CliResult {
    let view = lifecycle.load_state(index, clock.now_ms())?;
    let challenge = lifecycle.catalog().challenge(index)?.clone();
    print_json(&json!({
        "index": index,
        "challenge": challenge,
        "duration_secs": lifecycle.duration_for(index),
        "state": view.state,
        "remaining_secs": view.remaining_secs,
        "remaining": view.remaining_secs.map(format_clock),
        "streak": lifecycle.streak()?,
    }))
}

fn report_ignored(
    lifecycle: &mut ChallengeLifecycle<SqliteStore>,
    index: usize,
    action: &str,
    clock: &impl Clock,
) -> CliResult {
    let view = lifecycle.load_state(index, clock.now_ms())?;
    eprintln!("{action} ignored: challenge {index} is {}", view.state);
    print_json(&lifecycle.snapshot(index, clock.now_ms())?)
}

/// Drive `tick` from a countdown until it expires or the user interrupts.
async fn watch(
    lifecycle: &mut ChallengeLifecycle<SqliteStore>,
    config: &Config,
    index: usize,
    clock: &impl Clock,
) -> CliResult {
    let view = lifecycle.load_state(index, clock.now_ms())?;
    if view.state != ChallengeState::InProgress {
        eprintln!("challenge {index} is {}, nothing to watch", view.state);
        return print_json(&lifecycle.snapshot(index, clock.now_ms())?);
    }

    let mut remaining = view.remaining_secs.unwrap_or(0);
    let period = Duration::from_millis(config.timer.tick_interval_ms.max(1));
    let mut countdown = Countdown::start(remaining, period);
    eprint!("\r{}", format_clock(remaining));

    let outcome = loop {
        tokio::select! {
            tick = countdown.next_tick() => {
                if tick.is_none() {
                    break None;
                }
                match lifecycle.tick(index, remaining, clock.now_ms())? {
                    Some(Event::TimerTicked { remaining_secs, .. }) => {
                        remaining = remaining_secs;
                        eprint!("\r{}", format_clock(remaining));
                    }
                    other => break other,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!(index, remaining, "watch interrupted");
                break None;
            }
        }
    };
    countdown.stop();
    eprintln!();

    match outcome {
        Some(event) => print_json(&event),
        None => print_json(&lifecycle.snapshot(index, clock.now_ms())?),
    }
}
