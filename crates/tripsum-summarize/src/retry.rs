use std::fmt::Display;
use std::future::Future;

use tokio::time::sleep;

use tripsum_core::{Error, Result, RetryPolicy};

/// Run `operation` until it succeeds or the policy runs out of attempts.
///
/// The closure receives the zero-based attempt index. Between failures the
/// loop sleeps for [`RetryPolicy::delay_for`]; no sleep follows the final
/// attempt. Exhaustion yields [`Error::Connection`] carrying the last error.
/// An invalid policy is rejected before the first attempt.
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    policy.validate()?;
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(event = "connected_after_retries", retries = attempt);
                }
                return Ok(value);
            }
            Err(err) => {
                let attempts = attempt + 1;
                let last = err.to_string();

                if attempts >= policy.max_attempts {
                    tracing::error!(
                        event = "connect_failed",
                        attempts = attempts,
                        error = %last
                    );
                    return Err(Error::Connection { attempts, last });
                }

                let delay = policy.delay_for(attempt);
                // always visible, whatever the log filter
                eprintln!("{}", waiting_notice(attempts, policy.max_attempts, &last));
                tracing::warn!(
                    event = "connect_attempt_failed",
                    attempt = attempts,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %last,
                    "waiting for database"
                );

                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Line printed to stderr after every failed attempt that will be retried.
pub fn waiting_notice(attempt: u32, max_attempts: u32, error: &str) -> String {
    format!("Waiting for database... (attempt {attempt}/{max_attempts}: {error})")
}
