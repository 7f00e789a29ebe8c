use std::future::Future;
use std::time::Duration;

use repairdesk_store::{StoreError, StoreResult};
use tracing::warn;

use crate::ResolveError;

/// Default number of automatic retries for a failed store lookup.
pub const DEFAULT_RETRIES: u32 = 1;

/// Default pause between a failed lookup and its retry.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);

/// Default upper bound on a single lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// How store lookups react to transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Automatic retries after the first failed attempt.
	pub retries: u32,
	/// Pause before each retry.
	pub backoff: Duration,
	/// Per-attempt bound; an expired attempt counts as a transient failure.
	pub timeout: Option<Duration>,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			retries: DEFAULT_RETRIES,
			backoff: DEFAULT_BACKOFF,
			timeout: Some(DEFAULT_LOOKUP_TIMEOUT),
		}
	}
}

impl RetryPolicy {
	/// A policy that surfaces the first failure.
	pub const fn no_retry() -> Self {
		Self {
			retries: 0,
			backoff: Duration::ZERO,
			timeout: None,
		}
	}

	/// Runs `lookup`, retrying transient failures per this policy.
	pub(crate) async fn run<T, F, Fut>(&self, op: &'static str, mut lookup: F) -> Result<T, ResolveError>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = StoreResult<T>>,
	{
		let mut attempts = 0u32;
		loop {
			attempts = attempts.saturating_add(1);
			let result = match self.timeout {
				Some(limit) => tokio::time::timeout(limit, lookup()).await.unwrap_or(Err(StoreError::Timeout(limit))),
				None => lookup().await,
			};
			match result {
				Ok(value) => return Ok(value),
				Err(error) if attempts <= self.retries => {
					warn!(op, attempts, %error, "resolver.lookup.retry");
					if !self.backoff.is_zero() {
						tokio::time::sleep(self.backoff).await;
					}
				}
				Err(source) => return Err(ResolveError::Transient { source, attempts }),
			}
		}
	}
}
