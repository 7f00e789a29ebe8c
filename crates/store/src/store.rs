use std::sync::Arc;

use async_trait::async_trait;
use repairdesk_primitives::{EntityId, EntityKey, EntityKind, TenantId};

use crate::{Customer, EntityRecord, StoreResult};

/// Keyed lookup service for entity records.
///
/// Implementations are shared and externally synchronized. Callers perform no
/// caching: every call is a fresh query against whatever consistency the
/// backend offers.
#[async_trait]
pub trait EntityStore: Send + Sync {
	/// Fetches one record by kind and id, regardless of tenant.
	///
	/// Tenant checks are the caller's job; the store only answers whether the
	/// record exists.
	async fn get(&self, key: &EntityKey) -> StoreResult<Option<EntityRecord>>;

	/// Fetches a customer by id, regardless of tenant.
	async fn get_customer(&self, id: &EntityId) -> StoreResult<Option<Customer>>;

	/// Lists every record of `kind` owned by `tenant`, ordered by id.
	async fn list(&self, kind: EntityKind, tenant: &TenantId) -> StoreResult<Vec<EntityRecord>>;
}

#[async_trait]
impl<S> EntityStore for Arc<S>
where
	S: EntityStore + ?Sized,
{
	async fn get(&self, key: &EntityKey) -> StoreResult<Option<EntityRecord>> {
		(**self).get(key).await
	}

	async fn get_customer(&self, id: &EntityId) -> StoreResult<Option<Customer>> {
		(**self).get_customer(id).await
	}

	async fn list(&self, kind: EntityKind, tenant: &TenantId) -> StoreResult<Vec<EntityRecord>> {
		(**self).list(kind, tenant).await
	}
}
