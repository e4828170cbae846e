//! Quiescence debouncing for bursty input such as search-as-you-type.
//!
//! A [`Debouncer`] holds at most one pending value. Every [`push`] replaces
//! it and restarts the quiet-period timer; [`ready`] resolves once the
//! value has gone unreplaced for the full interval. `ready` is cancel-safe
//! and pends forever when nothing is queued, so it can sit in a
//! `tokio::select!` loop next to the input stream.
//!
//! [`push`]: Debouncer::push
//! [`ready`]: Debouncer::ready

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Queue `value`, replacing anything pending and restarting the timer.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.interval));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without applying it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Wait for the pending value to go quiet, then take it.
    pub async fn ready(&mut self) -> T {
        let Some((_, deadline)) = self.pending.as_ref() else {
            return std::future::pending().await;
        };
        sleep_until(*deadline).await;

        match self.pending.take() {
            Some((value, _)) => value,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const QUIET: Duration = Duration::from_millis(150);

    #[tokio::test(start_paused = true)]
    async fn applies_once_after_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();
        debouncer.push("a");
        assert_eq!(debouncer.ready().await, "a");
        assert!(start.elapsed() >= QUIET);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn each_push_restarts_the_timer() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.push("a");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("ab");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("abc");

        // Only 0ms of quiet so far; 140ms is still short of the interval.
        assert!(timeout(Duration::from_millis(140), debouncer.ready())
            .await
            .is_err());
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.ready().await, "abc");
        assert!(start.elapsed() >= Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_pending_never_resolves() {
        let mut debouncer: Debouncer<&str> = Debouncer::new(QUIET);
        assert!(timeout(Duration::from_secs(5), debouncer.ready())
            .await
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push(1);
        assert_eq!(debouncer.cancel(), Some(1));
        assert!(timeout(Duration::from_secs(1), debouncer.ready())
            .await
            .is_err());
    }
}
