//! Timeout enforcement.
//!
//! # Responsibilities
//! - Race an upstream call against a deadline timer
//! - Cancel the call cleanly when the timer fires first
//! - Report which side won without inspecting error types
//!
//! # Design Decisions
//! - Uses Tokio's timer; the losing future is dropped, releasing its socket
//! - Timeouts are a distinct outcome, never mixed with call errors
//! - Timed-out requests become 504 Gateway Timeout at the HTTP layer

use std::future::Future;
use std::time::Duration;

/// Outcome of a deadline-bounded call.
#[derive(Debug, PartialEq, Eq)]
pub enum Bounded<T> {
    /// The call finished (successfully or not) before the deadline.
    Completed(T),
    /// The deadline fired first and the call was cancelled.
    TimedOut,
}

/// Run `call` with a hard deadline.
///
/// On expiry the call future is dropped before this returns, so any
/// connection it holds is closed rather than left dangling.
pub async fn bounded<F>(deadline: Duration, call: F) -> Bounded<F::Output>
where
    F: Future,
{
    let timer = tokio::time::sleep(deadline);
    tokio::select! {
        biased;
        output = call => Bounded::Completed(output),
        _ = timer => Bounded::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_completing_call_times_out_at_deadline() {
        let released = Arc::new(AtomicBool::new(false));
        let guard = DropFlag(released.clone());
        let call = async move {
            let _guard = guard;
            std::future::pending::<Result<(), ()>>().await
        };

        let start = Instant::now();
        let outcome = bounded(Duration::from_millis(60_000), call).await;

        assert_eq!(outcome, Bounded::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(60_000));
        assert!(released.load(Ordering::SeqCst), "cancelled call must be dropped");
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_finishing_first_is_returned() {
        let call = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ()>("done")
        };
        assert_eq!(
            bounded(Duration::from_secs(60), call).await,
            Bounded::Completed(Ok("done"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_error_is_not_a_timeout() {
        let call = async { Err::<(), _>("connection refused") };
        assert_eq!(
            bounded(Duration::from_secs(60), call).await,
            Bounded::Completed(Err("connection refused"))
        );
    }
}
