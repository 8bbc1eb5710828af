//! Bounded fixed-interval polling.
//!
//! The only timing primitive in the deployment sequence. Every wait on an
//! asynchronous platform transition goes through [`poll_until`].

use std::future::Future;

use anyhow::Result;

use crate::domain::{DeployError, PollPolicy};

/// Call `probe` until it returns `true` or the attempt budget runs out.
///
/// - `true` on attempt `k` returns immediately after `k` calls, with no
///   trailing sleep.
/// - `false` sleeps `policy.interval` before the next attempt, except after
///   the last one.
/// - An error from `probe` aborts the poll and is returned as-is.
///
/// A policy with zero attempts still makes one attempt.
///
/// # Errors
///
/// Returns [`DeployError::PollExhausted`] when every attempt returned `false`,
/// or the first error returned by `probe`.
pub async fn poll_until<F, Fut>(what: &str, policy: PollPolicy, mut probe: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let max_attempts = policy.max_attempts.max(1);
    tracing::info!(what, max_attempts, interval = ?policy.interval, "waiting");

    for attempt in 1..=max_attempts {
        tracing::info!(what, attempt, "try");
        if probe().await? {
            tracing::info!(what, attempt, "success");
            return Ok(());
        }
        if attempt < max_attempts {
            tracing::debug!(what, interval = ?policy.interval, "sleep");
            tokio::time::sleep(policy.interval).await;
        }
    }

    tracing::error!(what, attempts = max_attempts, "max tried");
    Err(DeployError::PollExhausted {
        what: what.to_owned(),
        attempts: max_attempts,
    }
    .into())
}
