use crate::deadline::{Deadline, Interrupt};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Indicates whether an error should be retried or treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDisposition {
    /// Retry after the policy's backoff delay.
    Retry,
    /// Retry after the server-supplied delay instead of the backoff.
    RetryAfter(Duration),
    Stop,
}

/// Result of running an operation under the retry policy.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The error was considered fatal and should bubble up immediately.
    Fatal(E),
    /// The error was retryable, but the configured attempts were exhausted.
    AttemptsExceeded { error: E, attempts: usize },
    /// The deadline passed or the run was cancelled, during an attempt or a wait.
    Interrupted(Interrupt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per operation, the first one included.
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: if max_delay.is_zero() {
                base_delay
            } else {
                max_delay
            },
        }
    }

    /// Executes the operation with the configured retry policy.
    ///
    /// Every attempt and every wait is bounded by `deadline`. `on_retry` is
    /// called once per wait with the attempt number that failed, the delay
    /// about to be slept and the error.
    pub async fn run<F, Fut, T, E, Classifier, Observer>(
        &self,
        deadline: &Deadline,
        mut op: F,
        classify: Classifier,
        mut on_retry: Observer,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        Classifier: Fn(&E) -> RetryDisposition,
        Observer: FnMut(usize, Duration, &E),
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let outcome = deadline.run(op()).await.map_err(RetryError::Interrupted)?;

            let err = match outcome {
                Ok(result) => return Ok(result),
                Err(err) => err,
            };

            let delay = match classify(&err) {
                RetryDisposition::Stop => return Err(RetryError::Fatal(err)),
                RetryDisposition::Retry => self.backoff_delay(attempt),
                RetryDisposition::RetryAfter(hint) => hint,
            };

            if attempt >= self.max_attempts {
                warn!(attempts = attempt, "Retry attempts exhausted");
                return Err(RetryError::AttemptsExceeded {
                    error: err,
                    attempts: attempt,
                });
            }

            on_retry(attempt, delay, &err);
            deadline.sleep(delay).await.map_err(RetryError::Interrupted)?;
        }
    }

    /// `base · 2^attempt`, capped at `max_delay`; `attempt` counts the attempts
    /// already made.
    pub fn backoff_delay(&self, attempt: usize) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }

        let factor = 1u128 << attempt.min(16);
        let base_ms = self.base_delay.as_millis();
        let delay_ms = base_ms.saturating_mul(factor);
        let capped = delay_ms.min(self.max_delay.as_millis());
        Duration::from_millis(capped as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Permanent,
        Throttled(Duration),
    }

    fn classify(err: &TestError) -> RetryDisposition {
        match err {
            TestError::Transient => RetryDisposition::Retry,
            TestError::Permanent => RetryDisposition::Stop,
            TestError::Throttled(after) => RetryDisposition::RetryAfter(*after),
        }
    }

    fn unbounded() -> Deadline {
        Deadline::unbounded(CancellationToken::new())
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (1..=6).map(|a| policy.backoff_delay(a).as_secs()).collect();
        assert_eq!(delays, vec![2, 4, 8, 16, 30, 30]);
    }

    #[test]
    fn test_zero_base_means_no_wait() {
        let policy = RetryPolicy::new(3, Duration::ZERO, Duration::ZERO);
        assert_eq!(policy.backoff_delay(4), Duration::ZERO);
        assert_eq!(policy.max_attempts, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let mut waits = Vec::new();
        let policy = RetryPolicy::default();
        let started = Instant::now();

        let result = policy
            .run(
                &unbounded(),
                || {
                    let attempts = attempts.clone();
                    async move {
                        if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                            Err(TestError::Transient)
                        } else {
                            Ok("done")
                        }
                    }
                },
                classify,
                |attempt, delay, _| waits.push((attempt, delay)),
            )
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(
            waits,
            vec![(1, Duration::from_secs(2)), (2, Duration::from_secs(4))]
        );
        assert_eq!(started.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_hint_overrides_backoff() {
        let attempts = AtomicUsize::new(0);
        let started = Instant::now();

        let result = RetryPolicy::default()
            .run(
                &unbounded(),
                || {
                    let n = attempts.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n == 0 {
                            Err(TestError::Throttled(Duration::from_millis(500)))
                        } else {
                            Ok(())
                        }
                    }
                },
                classify,
                |_, _, _| {},
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(started.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let attempts = AtomicUsize::new(0);
        let result: Result<(), _> = RetryPolicy::default()
            .run(
                &unbounded(),
                || {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    async { Err(TestError::Permanent) }
                },
                classify,
                |_, _, _| panic!("no retry expected"),
            )
            .await;

        assert!(matches!(result, Err(RetryError::Fatal(TestError::Permanent))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_after_max_attempts() {
        let attempts = AtomicUsize::new(0);
        let mut waits = 0;
        let policy = RetryPolicy::new(3, Duration::from_millis(10), Duration::from_secs(1));

        let result: Result<(), _> = policy
            .run(
                &unbounded(),
                || {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    async { Err(TestError::Transient) }
                },
                classify,
                |_, _, _| waits += 1,
            )
            .await;

        match result {
            Err(RetryError::AttemptsExceeded { error, attempts }) => {
                assert_eq!(error, TestError::Transient);
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(waits, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_past_deadline_is_interrupted() {
        let deadline = Deadline::after(Duration::from_secs(5), CancellationToken::new());
        let result: Result<(), _> = RetryPolicy::default()
            .run(
                &deadline,
                || async { Err(TestError::Throttled(Duration::from_secs(60))) },
                classify,
                |_, _, _| {},
            )
            .await;

        assert!(matches!(
            result,
            Err(RetryError::Interrupted(Interrupt::TimedOut { .. }))
        ));
    }
}
