// src/integrations/pokeapi/retry.rs
//
// Retry with exponential backoff for upstream catalog calls.
//
// Only transient failures are retried: connection-level errors and
// 5xx responses. Client errors (4xx) and decode failures surface
// immediately. The backoff schedule is initial_delay * multiplier^attempt,
// capped at max_delay.

use std::future::Future;
use std::time::Duration;

use crate::integrations::pokeapi::client::FetchError;

/// Backoff schedule and attempt bound for upstream calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Factor applied to the delay after each retry
    pub multiplier: f64,

    /// Upper bound for a single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            initial_delay: Duration::from_millis(500),
            multiplier: 1.5,
            max_delay: Duration::from_millis(3000),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep before retrying after the given zero-based attempt
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let scaled = self.initial_delay.mul_f64(self.multiplier.powi(attempt as i32));
        scaled.min(self.max_delay)
    }
}

/// Run `operation`, retrying transient failures according to `policy`.
///
/// The last error is returned once the attempt bound is exhausted or a
/// non-retryable failure occurs.
pub async fn execute<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay_for_attempt(attempt);
                log::warn!(
                    "retryable upstream failure (attempt {}/{}), retrying in {} ms: {}",
                    attempt + 1,
                    policy.max_retries,
                    delay.as_millis(),
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_delay: Duration::from_millis(1),
            multiplier: 1.0,
            max_delay: Duration::from_millis(2),
        }
    }

    fn connection_error() -> FetchError {
        FetchError::Connection {
            url: "https://pokeapi.co/api/v2/pokemon".to_string(),
            message: "connection refused".to_string(),
        }
    }

    fn status_error(status: u16) -> FetchError {
        FetchError::UpstreamStatus {
            url: "https://pokeapi.co/api/v2/pokemon".to_string(),
            status,
            body: "error body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_is_not_retried() {
        let attempts = AtomicUsize::new(0);

        let result = execute(&fast_policy(4), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, FetchError>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried_until_success() {
        let attempts = AtomicUsize::new(0);

        let result = execute(&fast_policy(4), || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(connection_error())
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_bound_is_exhausted() {
        let attempts = AtomicUsize::new(0);

        let result: Result<i32, _> = execute(&fast_policy(2), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(connection_error()) }
        })
        .await;

        assert!(result.is_err());
        // first attempt + 2 retries
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let attempts = AtomicUsize::new(0);

        let result: Result<i32, _> = execute(&fast_policy(1), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(status_error(500)) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let attempts = AtomicUsize::new(0);

        let result: Result<i32, _> = execute(&fast_policy(4), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(status_error(404)) }
        })
        .await;

        match result {
            Err(FetchError::UpstreamStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(750));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(1125));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_micros(1_687_500));
        // capped
        assert_eq!(policy.delay_for_attempt(5), Duration::from_millis(3000));
    }
}
