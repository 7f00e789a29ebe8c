use repairdesk_primitives::{EntityId, EntityKey, EntityKind, TenantId, decode};
use repairdesk_store::{Customer, EntityRecord, EntityStore, Equipment, Repair};
use tracing::{debug, info, warn};

use crate::{EntityPayload, NavigationTarget, RepairDetail, ResolveError, RetryPolicy, Screen};

/// Decodes scanned codes and resolves them against an [`EntityStore`].
///
/// Holds no per-scan state and caches nothing, so one resolver can be shared
/// by every scan session.
#[derive(Debug)]
pub struct Resolver<S> {
	store: S,
	retry: RetryPolicy,
}

impl<S: EntityStore> Resolver<S> {
	pub fn new(store: S) -> Self {
		Self {
			store,
			retry: RetryPolicy::default(),
		}
	}

	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}

	/// Parses raw scanned text into an entity key.
	pub fn decode(&self, raw: &str) -> Result<EntityKey, ResolveError> {
		decode(raw).map_err(|err| {
			debug!(%err, len = raw.len(), "resolver.decode.rejected");
			ResolveError::from(err)
		})
	}

	/// Looks up `key` and checks that it belongs to `caller`.
	///
	/// Existence is checked before ownership, so a missing record is always
	/// [`ResolveError::NotFound`] whatever the caller's tenant.
	pub async fn resolve_and_authorize(&self, key: &EntityKey, caller: &TenantId) -> Result<NavigationTarget, ResolveError> {
		let record = self.retry.run("get", || self.store.get(key)).await?;
		let Some(record) = record else {
			info!(%key, %caller, "resolver.resolve.not_found");
			return Err(ResolveError::NotFound { key: key.clone() });
		};

		if record.tenant_id() != caller {
			warn!(%key, owner = %record.tenant_id(), %caller, "resolver.resolve.cross_tenant");
			return Err(ResolveError::CrossTenantAccess {
				key: key.clone(),
				owner: record.tenant_id().clone(),
				caller: caller.clone(),
			});
		}

		let reference = record.reference();
		let payload = match record {
			EntityRecord::Repair(repair) => EntityPayload::Repair(Box::new(self.hydrate_repair(repair, caller).await?)),
			EntityRecord::Part(part) => EntityPayload::Part(part),
			EntityRecord::Equipment(equipment) => EntityPayload::Equipment(equipment),
		};

		debug!(%key, "resolver.resolve.ok");
		Ok(NavigationTarget {
			screen: Screen::for_kind(reference.kind),
			reference,
			payload,
		})
	}

	/// Decodes `raw` and resolves it for `caller`.
	///
	/// Decoding completes before any store lookup is issued.
	pub async fn decode_and_resolve(&self, raw: &str, caller: &TenantId) -> Result<NavigationTarget, ResolveError> {
		let key = self.decode(raw)?;
		self.resolve_and_authorize(&key, caller).await
	}

	/// Fetches the repair's customer and equipment concurrently.
	async fn hydrate_repair(&self, repair: Repair, caller: &TenantId) -> Result<RepairDetail, ResolveError> {
		let (customer, equipment) = tokio::try_join!(
			self.related_customer(&repair.customer_id, caller),
			self.related_equipment(&repair.equipment_id, caller),
		)?;
		if customer.is_none() || equipment.is_none() {
			warn!(
				repair = %repair.id,
				customer_missing = customer.is_none(),
				equipment_missing = equipment.is_none(),
				"resolver.hydrate.incomplete"
			);
		}
		Ok(RepairDetail { repair, customer, equipment })
	}

	async fn related_customer(&self, id: &EntityId, caller: &TenantId) -> Result<Option<Customer>, ResolveError> {
		let customer = self.retry.run("get_customer", || self.store.get_customer(id)).await?;
		Ok(customer.filter(|c| &c.tenant_id == caller))
	}

	async fn related_equipment(&self, id: &EntityId, caller: &TenantId) -> Result<Option<Equipment>, ResolveError> {
		let key = EntityKey::new(EntityKind::Equipment, id.clone());
		let record = self.retry.run("get", || self.store.get(&key)).await?;
		Ok(match record {
			Some(EntityRecord::Equipment(equipment)) if &equipment.tenant_id == caller => Some(equipment),
			_ => None,
		})
	}
}

#[cfg(test)]
mod tests;
