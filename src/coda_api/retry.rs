use std::future::Future;
use std::time::Duration;

use super::FetchError;
use crate::config::RetrySettings;

const MAX_DELAY: Duration = Duration::from_secs(5);

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// `settings.attempts` attempts have been made. The delay doubles after each failure.
pub async fn with_retry<T, F, Fut>(
    settings: &RetrySettings,
    what: &str,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let attempts = settings.attempts.max(1);
    let mut delay = Duration::from_millis(settings.initial_delay_ms);
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    log::info!("{what} succeeded after {attempt} attempts");
                }
                return Ok(result);
            }
            Err(err) if err.is_retryable() && attempt < attempts => {
                log::warn!("{what} failed (attempt {attempt}/{attempts}), retrying in {delay:?}: {err}");
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
                attempt += 1;
            }
            Err(err) => {
                log::error!("{what} failed after {attempt} attempts: {err}");
                return Err(err);
            }
        }
    }
}
