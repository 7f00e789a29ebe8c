//! Store wrapper that adds latency and injected failures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use repairdesk_primitives::{EntityId, EntityKey, EntityKind, TenantId};
use tracing::debug;

use crate::{Customer, EntityRecord, EntityStore, StoreError, StoreResult};

/// Wraps a store so every call first sleeps for a fixed latency, and the next
/// `fail_next` calls fail with [`StoreError::Unavailable`].
#[derive(Debug)]
pub struct UnreliableStore<S> {
	inner: S,
	latency: Duration,
	failures_left: AtomicUsize,
	calls: AtomicUsize,
}

impl<S> UnreliableStore<S> {
	pub fn new(inner: S) -> Self {
		Self {
			inner,
			latency: Duration::ZERO,
			failures_left: AtomicUsize::new(0),
			calls: AtomicUsize::new(0),
		}
	}

	/// Sets the delay applied before every call.
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = latency;
		self
	}

	/// Makes the next `count` calls fail.
	pub fn fail_next(&self, count: usize) {
		self.failures_left.store(count, Ordering::Release);
	}

	/// Returns how many calls reached this wrapper, failed ones included.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::Acquire)
	}

	async fn before_call(&self, op: &'static str) -> StoreResult<()> {
		self.calls.fetch_add(1, Ordering::AcqRel);
		if !self.latency.is_zero() {
			tokio::time::sleep(self.latency).await;
		}
		let injected = self
			.failures_left
			.fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| left.checked_sub(1))
			.is_ok();
		if injected {
			debug!(op, "store.unreliable.injected_failure");
			return Err(StoreError::Unavailable(format!("injected failure in {op}")));
		}
		Ok(())
	}
}

#[async_trait]
impl<S: EntityStore> EntityStore for UnreliableStore<S> {
	async fn get(&self, key: &EntityKey) -> StoreResult<Option<EntityRecord>> {
		self.before_call("get").await?;
		self.inner.get(key).await
	}

	async fn get_customer(&self, id: &EntityId) -> StoreResult<Option<Customer>> {
		self.before_call("get_customer").await?;
		self.inner.get_customer(id).await
	}

	async fn list(&self, kind: EntityKind, tenant: &TenantId) -> StoreResult<Vec<EntityRecord>> {
		self.before_call("list").await?;
		self.inner.list(kind, tenant).await
	}
}
