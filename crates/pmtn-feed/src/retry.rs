//! Fixed-backoff retry for feed requests.
//!
//! [`retry_with_backoff`] wraps a fallible async operation and retries on
//! transient errors (network failures, 5xx) with a constant sleep between
//! attempts. Non-transient errors — missing API keys, malformed responses,
//! application-level API errors — are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedError;

/// Returns `true` for errors that are worth retrying after the backoff delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 5xx responses: transient server/infrastructure errors.
///
/// **Not retriable (hard stop):**
/// - [`FeedError::MissingApiKey`] — configuration problem; retrying won't fix it.
/// - [`FeedError::MalformedResponse`] and [`FeedError::Xml`] — bad payload.
/// - [`FeedError::Api`] with a 4xx status — application-level rejection.
pub(crate) fn is_retriable(err: &FeedError) -> bool {
    match err {
        FeedError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        FeedError::Api { status, .. } => *status >= 500,
        FeedError::Xml(_) | FeedError::MissingApiKey(_) | FeedError::MalformedResponse(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors, sleeping a fixed `delay` between attempts.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    delay: Duration,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient feed error — retrying after fixed backoff"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_not_retriable() {
        assert!(!is_retriable(&FeedError::MissingApiKey("OPENAI_API_KEY")));
    }

    #[test]
    fn malformed_response_is_not_retriable() {
        assert!(!is_retriable(&FeedError::MalformedResponse(
            "no JSON array".to_owned()
        )));
    }

    #[test]
    fn client_error_status_is_not_retriable() {
        assert!(!is_retriable(&FeedError::Api {
            status: 401,
            body: "unauthorized".to_owned()
        }));
    }

    #[test]
    fn server_error_status_is_retriable() {
        assert!(is_retriable(&FeedError::Api {
            status: 503,
            body: "overloaded".to_owned()
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FeedError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_missing_api_key() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(FeedError::MissingApiKey("ANTHROPIC_API_KEY"))
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "MissingApiKey must not be retried"
        );
        assert!(matches!(result, Err(FeedError::MissingApiKey(_))));
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err::<u32, _>(FeedError::Api {
                        status: 500,
                        body: "flaky".to_owned(),
                    })
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99, "should succeed after retries");
        assert_eq!(
            calls.load(Ordering::SeqCst),
            3,
            "should have been called 3 times (2 failures + 1 success)"
        );
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(FeedError::Api {
                    status: 502,
                    body: "down".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "1 initial + 2 retries");
        assert!(matches!(result, Err(FeedError::Api { status: 502, .. })));
    }
}
