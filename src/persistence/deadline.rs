//! Upper bound on the duration of a single datastore call.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Default bound applied to every store and ledger call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// A datastore call did not finish before its deadline.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{operation} did not complete within {limit:?}")]
pub struct DeadlineElapsed {
    /// Name of the abandoned operation.
    pub operation: &'static str,
    /// Bound that was exceeded.
    pub limit: Duration,
}

/// Awaits `future` for at most `limit`.
///
/// On expiry the future is dropped, which cancels any work it was driving.
///
/// # Errors
///
/// Returns [`DeadlineElapsed`] when `limit` passes first.
pub async fn with_deadline<F, T>(
    operation: &'static str,
    limit: Duration,
    future: F,
) -> Result<T, DeadlineElapsed>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| DeadlineElapsed { operation, limit })
}

#[cfg(test)]
mod tests {
    use super::with_deadline;
    use std::time::Duration;

    #[tokio::test]
    async fn returns_output_when_future_finishes_in_time() {
        let output = with_deadline("ready", Duration::from_secs(1), async { 7 }).await;
        assert_eq!(output, Ok(7));
    }

    #[tokio::test]
    async fn reports_operation_when_deadline_passes() {
        let limit = Duration::from_millis(10);
        let result = with_deadline("stalled", limit, std::future::pending::<()>()).await;

        let err = result.expect_err("pending future must time out");
        assert_eq!(err.operation, "stalled");
        assert_eq!(err.limit, limit);
    }
}
