//! Cancellable one-second ticker.
//!
//! The ticker only measures time; it never touches storage. A consumer
//! receives the remaining count after each period and forwards it to
//! [`super::ChallengeLifecycle::tick`]. The background task is aborted by
//! [`CountdownHandle::stop`] and by dropping the handle.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub struct Countdown;

impl Countdown {
    /// Spawn a ticker that counts `remaining_secs` down to zero, one step
    /// per `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(remaining_secs: u64, period: Duration) -> CountdownHandle {
        let (tx, rx) = mpsc::channel(8);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut remaining = remaining_secs;
            while remaining > 0 {
                interval.tick().await;
                remaining -= 1;
                if tx.send(remaining).await.is_err() {
                    break;
                }
            }
        });
        CountdownHandle {
            rx,
            task,
            stopped: false,
        }
    }
}

pub struct CountdownHandle {
    rx: mpsc::Receiver<u64>,
    task: JoinHandle<()>,
    stopped: bool,
}

impl CountdownHandle {
    /// Wait for the next tick. Yields the remaining seconds, or `None` once
    /// the count is exhausted or the handle was stopped.
    pub async fn next_tick(&mut self) -> Option<u64> {
        if self.stopped {
            return None;
        }
        self.rx.recv().await
    }

    /// Cancel the ticker. Idempotent.
    pub fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.task.abort();
            self.rx.close();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn counts_down_to_zero() {
        let mut handle = Countdown::start(3, Duration::from_secs(1));
        let started = Instant::now();
        assert_eq!(handle.next_tick().await, Some(2));
        assert_eq!(handle.next_tick().await, Some(1));
        assert_eq!(handle.next_tick().await, Some(0));
        assert_eq!(handle.next_tick().await, None);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_remaining_never_ticks() {
        let mut handle = Countdown::start(0, Duration::from_secs(1));
        assert_eq!(handle.next_tick().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_stream() {
        let mut handle = Countdown::start(100, Duration::from_secs(1));
        assert_eq!(handle.next_tick().await, Some(99));
        handle.stop();
        handle.stop();
        assert!(handle.is_stopped());
        assert_eq!(handle.next_tick().await, None);
    }
}
