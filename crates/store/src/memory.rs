//! In-process store used by the CLI and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use repairdesk_primitives::{CODE_SEPARATOR, EntityId, EntityKey, EntityKind, TenantId};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{Customer, EntityRecord, EntityStore, Equipment, Part, RecordError, Repair, RepairStatus, Seed, StoreResult};

#[derive(Debug, Default)]
struct Tables {
	customers: BTreeMap<EntityId, Customer>,
	equipment: BTreeMap<EntityId, Equipment>,
	repairs: BTreeMap<EntityId, Repair>,
	parts: BTreeMap<EntityId, Part>,
}

/// Thread-safe in-memory [`EntityStore`].
///
/// Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
	tables: Arc<RwLock<Tables>>,
}

fn check_id(collection: &'static str, id: &EntityId) -> Result<(), RecordError> {
	if id.as_str().is_empty() || id.as_str().contains(CODE_SEPARATOR) {
		return Err(RecordError::InvalidId {
			collection,
			id: id.to_string(),
		});
	}
	Ok(())
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store holding every record in `seed`.
	pub fn from_seed(seed: Seed) -> Result<Self, RecordError> {
		let store = Self::new();
		let counts = (seed.customers.len(), seed.equipment.len(), seed.repairs.len(), seed.parts.len());
		for customer in seed.customers {
			store.insert_customer(customer)?;
		}
		for equipment in seed.equipment {
			store.insert(equipment.into())?;
		}
		for repair in seed.repairs {
			store.insert(repair.into())?;
		}
		for part in seed.parts {
			store.insert(part.into())?;
		}
		debug!(
			customers = counts.0,
			equipment = counts.1,
			repairs = counts.2,
			parts = counts.3,
			"store.memory.seeded"
		);
		Ok(store)
	}

	/// Allocates a fresh id. Generated ids never contain `:`.
	pub fn allocate_id() -> EntityId {
		EntityId::new(Uuid::new_v4().simple().to_string())
	}

	/// Inserts or replaces a customer.
	pub fn insert_customer(&self, customer: Customer) -> Result<(), RecordError> {
		check_id("customer", &customer.id)?;
		self.tables.write().customers.insert(customer.id.clone(), customer);
		Ok(())
	}

	/// Inserts or replaces a scannable record.
	pub fn insert(&self, record: EntityRecord) -> Result<(), RecordError> {
		check_id(record.kind().as_str(), record.id())?;
		let mut tables = self.tables.write();
		match record {
			EntityRecord::Repair(r) => {
				tables.repairs.insert(r.id.clone(), r);
			}
			EntityRecord::Part(p) => {
				tables.parts.insert(p.id.clone(), p);
			}
			EntityRecord::Equipment(e) => {
				tables.equipment.insert(e.id.clone(), e);
			}
		}
		Ok(())
	}

	/// Creates a customer with a store-assigned id.
	pub fn create_customer(&self, tenant_id: TenantId, name: impl Into<String>) -> Customer {
		let customer = Customer {
			id: Self::allocate_id(),
			tenant_id,
			name: name.into(),
			phone: None,
			email: None,
		};
		self.tables.write().customers.insert(customer.id.clone(), customer.clone());
		customer
	}

	/// Creates an equipment record with a store-assigned id.
	pub fn create_equipment(
		&self,
		tenant_id: TenantId,
		customer_id: Option<EntityId>,
		category: impl Into<String>,
		brand: impl Into<String>,
		model: impl Into<String>,
	) -> Equipment {
		let equipment = Equipment {
			id: Self::allocate_id(),
			tenant_id,
			customer_id,
			category: category.into(),
			brand: brand.into(),
			model: model.into(),
			serial_number: None,
		};
		self.tables.write().equipment.insert(equipment.id.clone(), equipment.clone());
		equipment
	}

	/// Opens a repair ticket in the `received` state with a store-assigned id.
	pub fn create_repair(
		&self,
		tenant_id: TenantId,
		customer_id: EntityId,
		equipment_id: EntityId,
		problem: impl Into<String>,
	) -> Repair {
		let repair = Repair {
			id: Self::allocate_id(),
			tenant_id,
			customer_id,
			equipment_id,
			problem: problem.into(),
			status: RepairStatus::default(),
			notes: None,
		};
		self.tables.write().repairs.insert(repair.id.clone(), repair.clone());
		repair
	}

	/// Creates a part with a store-assigned id.
	pub fn create_part(&self, tenant_id: TenantId, name: impl Into<String>, quantity: u32) -> Part {
		let part = Part {
			id: Self::allocate_id(),
			tenant_id,
			name: name.into(),
			sku: None,
			quantity,
			location: None,
		};
		self.tables.write().parts.insert(part.id.clone(), part.clone());
		part
	}

	/// Removes a record, returning it if it existed.
	pub fn remove(&self, key: &EntityKey) -> Option<EntityRecord> {
		let mut tables = self.tables.write();
		match key.kind {
			EntityKind::Repair => tables.repairs.remove(&key.id).map(Into::into),
			EntityKind::Part => tables.parts.remove(&key.id).map(Into::into),
			EntityKind::Equipment => tables.equipment.remove(&key.id).map(Into::into),
		}
	}

	/// Returns the number of scannable records of `kind`, across tenants.
	pub fn len(&self, kind: EntityKind) -> usize {
		let tables = self.tables.read();
		match kind {
			EntityKind::Repair => tables.repairs.len(),
			EntityKind::Part => tables.parts.len(),
			EntityKind::Equipment => tables.equipment.len(),
		}
	}
}

#[async_trait]
impl EntityStore for MemoryStore {
	async fn get(&self, key: &EntityKey) -> StoreResult<Option<EntityRecord>> {
		trace!(kind = %key.kind, id = %key.id, "store.memory.get");
		let tables = self.tables.read();
		let record = match key.kind {
			EntityKind::Repair => tables.repairs.get(&key.id).cloned().map(Into::into),
			EntityKind::Part => tables.parts.get(&key.id).cloned().map(Into::into),
			EntityKind::Equipment => tables.equipment.get(&key.id).cloned().map(Into::into),
		};
		Ok(record)
	}

	async fn get_customer(&self, id: &EntityId) -> StoreResult<Option<Customer>> {
		trace!(%id, "store.memory.get_customer");
		Ok(self.tables.read().customers.get(id).cloned())
	}

	async fn list(&self, kind: EntityKind, tenant: &TenantId) -> StoreResult<Vec<EntityRecord>> {
		let tables = self.tables.read();
		let records: Vec<EntityRecord> = match kind {
			EntityKind::Repair => tables.repairs.values().filter(|r| &r.tenant_id == tenant).cloned().map(Into::into).collect(),
			EntityKind::Part => tables.parts.values().filter(|p| &p.tenant_id == tenant).cloned().map(Into::into).collect(),
			EntityKind::Equipment => tables.equipment.values().filter(|e| &e.tenant_id == tenant).cloned().map(Into::into).collect(),
		};
		trace!(%kind, %tenant, count = records.len(), "store.memory.list");
		Ok(records)
	}
}
