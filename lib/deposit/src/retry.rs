//! Caller-side retries around [`prepare`].
//!
//! [`prepare`] never retries on its own. This wrapper re-runs the whole
//! preparation, fresh reads included, when the chain could not be reached.
//! Domain errors are final and return on the first attempt.
use std::time::Duration;

use tracing::warn;

use crate::{
    deposit::{prepare, DepositRequest, TransactionDescriptor},
    error::Error,
    reader::ChainReader,
};

/// Exponential backoff between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included. Zero behaves like
    /// one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Upper bound for the delay between attempts.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes a single attempt.
    #[must_use]
    pub fn none() -> Self {
        Self { max_attempts: 1, ..Self::default() }
    }

    /// Delay to wait after the failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}

/// Runs [`prepare`], retrying while it fails with [`Error::Chain`].
///
/// # Errors
///
/// The domain error of the first attempt that reaches one, or the last
/// [`Error::Chain`] once `policy.max_attempts` is exhausted.
pub async fn prepare_with_retry<R: ChainReader>(
    reader: &R,
    request: &DepositRequest,
    policy: &RetryPolicy,
) -> Result<TransactionDescriptor, Error<R::Error>> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match prepare(reader, request).await {
            Err(Error::Chain(e)) if attempt < max_attempts => {
                let delay = policy.backoff(attempt);
                warn!(
                    attempt,
                    max_attempts,
                    ?delay,
                    error = %e,
                    "chain request failed, retrying deposit preparation"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
