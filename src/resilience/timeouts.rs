//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap the backend call with an overall deadline
//! - Cancel the in-flight call cleanly when it expires
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the future cancels the call
//! - Timeout errors are distinct from other errors
//! - Timed-out requests surface as a 502 like any other forwarding failure

use std::future::Future;
use std::time::Duration;

use crate::upstream::ForwardError;

/// Run `fut`, giving up with [`ForwardError::Timeout`] after `deadline`.
pub async fn with_deadline<T, Fut>(deadline: Duration, fut: Fut) -> Result<T, ForwardError>
where
    Fut: Future<Output = Result<T, ForwardError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(deadline = ?deadline, "Upstream deadline exceeded");
            Err(ForwardError::Timeout(deadline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let out = with_deadline(Duration::from_secs(1), async { Ok::<_, ForwardError>(7) }).await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let out = with_deadline(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, ForwardError>(())
        })
        .await;
        assert!(matches!(out, Err(ForwardError::Timeout(d)) if d == Duration::from_millis(50)));
    }
}
