//! Bounded exponential-backoff retries.

use std::{fmt::Display, future::Future, time::Duration};
use tokio::time::sleep;
use tracing::{debug, warn};

/// How many times to retry and how long to wait in between.
///
/// Retry `n` (counting from 1) waits `initial_backoff * 2^(n - 1)`, so the
/// default policy waits 1s, 2s and then 4s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// Delay before retry number `retry` (1-based).
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)))
    }

    /// Runs `attempt` until it succeeds, fails with an error `is_transient`
    /// rejects, or the retries are used up.
    ///
    /// `attempt` receives the 0-based attempt number. The last error is
    /// returned once retries are exhausted.
    pub async fn run<T, E, F, Fut>(&self, mut attempt: F, is_transient: impl Fn(&E) -> bool) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut retries = 0;
        loop {
            match attempt(retries).await {
                Ok(value) => return Ok(value),
                Err(e) if is_transient(&e) && retries < self.max_retries => {
                    retries += 1;
                    let delay = self.backoff(retries);
                    warn!(
                        attempt = retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying"
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    if retries > 0 {
                        debug!(retries, "Giving up");
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use tokio::time::Instant;

    #[derive(Debug, PartialEq, Eq)]
    enum TestError {
        Transient,
        Fatal,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    const fn transient(e: &TestError) -> bool {
        matches!(e, TestError::Transient)
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_errors_until_exhausted() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let start = Instant::now();
        let started_at = RefCell::new(Vec::new());

        let result: Result<(), TestError> = policy
            .run(
                |_| {
                    started_at.borrow_mut().push(start.elapsed());
                    async { Err(TestError::Transient) }
                },
                transient,
            )
            .await;

        assert_eq!(result, Err(TestError::Transient));
        assert_eq!(
            started_at.into_inner(),
            vec![
                Duration::ZERO,
                Duration::from_secs(1),
                Duration::from_secs(3),
                Duration::from_secs(7),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_is_not_retried() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let calls = Cell::new(0);
        let start = Instant::now();

        let result: Result<(), TestError> = policy
            .run(
                |_| {
                    calls.set(calls.get() + 1);
                    async { Err(TestError::Fatal) }
                },
                transient,
            )
            .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_error() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));

        let result = policy
            .run(
                |attempt| async move {
                    if attempt < 2 {
                        Err(TestError::Transient)
                    } else {
                        Ok(attempt)
                    }
                },
                transient,
            )
            .await;

        assert_eq!(result, Ok(2));
    }
}
