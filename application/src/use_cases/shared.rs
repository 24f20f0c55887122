//! Shared utilities for use cases.
//!
//! Cancellation checks and a guard that bounds a collaborator call by a
//! timeout and a cancellation token.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Why a guarded call did not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupted {
    Cancelled,
    TimedOut(Duration),
}

/// Check if cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(CancellationToken::is_cancelled)
}

/// Run `call`, giving up when `timeout` elapses or `token` is cancelled.
///
/// The inner result is returned untouched; callers map [`Interrupted`]
/// into their own error type.
pub(crate) async fn guarded<F, T>(
    call: F,
    timeout: Option<Duration>,
    token: &Option<CancellationToken>,
) -> Result<T, Interrupted>
where
    F: Future<Output = T>,
{
    if is_cancelled(token) {
        return Err(Interrupted::Cancelled);
    }

    let timed = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| Interrupted::TimedOut(limit)),
            None => Ok(call.await),
        }
    };

    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(Interrupted::Cancelled),
                result = timed => result,
            }
        }
        None => timed.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guarded_passes_value_through() {
        let result = guarded(async { 42 }, Some(Duration::from_secs(1)), &None).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guarded_times_out() {
        let slow = tokio::time::sleep(Duration::from_secs(60));
        let result = guarded(slow, Some(Duration::from_secs(5)), &None).await;
        assert_eq!(result, Err(Interrupted::TimedOut(Duration::from_secs(5))));
    }

    #[tokio::test]
    async fn test_guarded_respects_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let result = guarded(async { 1 }, None, &Some(token)).await;
        assert_eq!(result, Err(Interrupted::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_guarded_cancelled_while_waiting() {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            child.cancel();
        });
        let slow = tokio::time::sleep(Duration::from_secs(60));
        let result = guarded(slow, None, &Some(token)).await;
        assert_eq!(result, Err(Interrupted::Cancelled));
    }
}
