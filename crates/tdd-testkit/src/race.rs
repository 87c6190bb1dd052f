//! Deadline race executor
//!
//! Runs an operation and a timer as sibling tasks in one [`JoinSet`] and
//! takes whichever finishes first. The loser is aborted before the call
//! returns; abort is cooperative, so the losing task stops at its next
//! await point, which may be after this function has already returned.

use crate::errors::RaceError;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

/// Race `operation` against a timer of length `timeout`.
///
/// Returns the operation's value if it finishes first. A domain error from
/// the operation is returned as [`RaceError::Operation`]; an expired timer
/// yields [`RaceError::Timeout`] and the operation's eventual result is
/// discarded. A panic inside the operation is resumed on the caller.
///
/// When the operation and timer complete at the same instant the winner is
/// whichever the runtime reports first.
pub async fn race_with_timeout<T, E, F>(timeout: Duration, operation: F) -> Result<T, RaceError<E>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    if timeout.is_zero() {
        return Err(RaceError::InvalidTimeout { timeout });
    }

    let mut group: JoinSet<Result<T, RaceError<E>>> = JoinSet::new();
    group.spawn(async move { operation.await.map_err(RaceError::Operation) });
    group.spawn(async move {
        tokio::time::sleep(timeout).await;
        Err(RaceError::Timeout { after: timeout })
    });

    let first = group.join_next().await;

    // Cancel whichever task is still running. Dropping the set afterwards
    // does not wait for the aborts to land.
    group.abort_all();
    trace!(remaining = group.len(), "race settled, loser aborted");

    match first {
        Some(Ok(Ok(value))) => {
            debug!(?timeout, "operation finished before deadline");
            Ok(value)
        }
        Some(Ok(Err(err))) => {
            if err.is_timeout() {
                warn!(?timeout, "operation did not finish before deadline");
            } else {
                debug!(?timeout, "operation failed before deadline");
            }
            Err(err)
        }
        Some(Err(join_err)) if join_err.is_panic() => {
            std::panic::resume_unwind(join_err.into_panic())
        }
        Some(Err(_)) | None => {
            warn!(?timeout, "race group yielded no outcome");
            Err(RaceError::NoResult)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_timeout_is_rejected() {
        let result = race_with_timeout(Duration::ZERO, async { Ok::<_, ()>(1) }).await;
        assert_eq!(
            result,
            Err(RaceError::InvalidTimeout {
                timeout: Duration::ZERO
            })
        );
    }

    #[tokio::test]
    async fn test_immediate_value_wins() {
        let result = race_with_timeout(Duration::from_secs(1), async { Ok::<_, ()>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_operation_times_out() {
        let after = Duration::from_secs(30);
        let result =
            race_with_timeout(after, std::future::pending::<Result<(), ()>>()).await;
        assert_eq!(result, Err(RaceError::Timeout { after }));
    }
}
