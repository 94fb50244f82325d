//! Minimum spacing between outbound model calls.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Keeps consecutive call starts at least `min_interval` apart.
///
/// The lock is held across the wait, so callers leave in the order they
/// arrived (tokio's mutex is fair).
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl Throttle {
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_start: Mutex::const_new(None),
        }
    }

    /// Suspend until a call may start, then record that start.
    pub async fn wait_for_slot(&self) {
        let mut last_start = self.last_start.lock().await;
        if let Some(previous) = *last_start {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                tracing::debug!(
                    wait_ms = (ready_at - Instant::now()).as_millis(),
                    "throttling model call"
                );
                sleep_until(ready_at).await;
            }
        }
        *last_start = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn first_call_does_not_wait() {
        let throttle = Throttle::new(Duration::from_secs(5));
        let before = Instant::now();
        throttle.wait_for_slot().await;
        assert_eq!(Instant::now() - before, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_waits_for_the_remainder() {
        let throttle = Throttle::new(Duration::from_secs(5));
        let start = Instant::now();
        throttle.wait_for_slot().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        throttle.wait_for_slot().await;
        assert_eq!(Instant::now() - start, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_after_interval_elapsed() {
        let throttle = Throttle::new(Duration::from_secs(5));
        throttle.wait_for_slot().await;
        tokio::time::advance(Duration::from_secs(9)).await;
        let before = Instant::now();
        throttle.wait_for_slot().await;
        assert_eq!(Instant::now() - before, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_starts_are_spaced() {
        let throttle = Arc::new(Throttle::new(Duration::from_secs(5)));
        let origin = Instant::now();
        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let throttle = Arc::clone(&throttle);
                tokio::spawn(async move {
                    throttle.wait_for_slot().await;
                    Instant::now()
                })
            })
            .collect();

        let mut starts = Vec::new();
        for task in tasks {
            starts.push(task.await.unwrap() - origin);
        }
        starts.sort();
        assert_eq!(
            starts,
            vec![
                Duration::ZERO,
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(15),
            ]
        );
    }
}
