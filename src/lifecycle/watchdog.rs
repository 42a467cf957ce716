//! # Liveness Watchdog
//!
//! Neither core has a timeout of its own: a ring whose acquisition order admits a cycle
//! simply never returns. The watchdog bounds how long a caller is willing to wait and
//! reports the stall as an error instead of hanging forever.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// A future failed to finish within its time budget.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LivenessError {
    #[error("no progress within {budget:?}; the session is stalled (possible deadlock)")]
    Stalled { budget: Duration },
}

/// Runs `fut` to completion or gives up after `budget`.
///
/// On timeout the future is dropped. Tasks it had spawned keep running (and may stay
/// blocked forever); only the caller is released.
pub async fn watchdog<F: Future>(budget: Duration, fut: F) -> Result<F::Output, LivenessError> {
    match tokio::time::timeout(budget, fut).await {
        Ok(output) => Ok(output),
        Err(_) => {
            error!(?budget, "Watchdog fired");
            Err(LivenessError::Stalled { budget })
        }
    }
}
