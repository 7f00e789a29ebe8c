//! Domain records held by the store.
//!
//! Only the fields the detail views and list filters need are modelled here;
//! everything else lives in the backend untouched.

use repairdesk_primitives::{EntityId, EntityKey, EntityKind, EntityReference, TenantId};
use serde::{Deserialize, Serialize};

/// A shop customer. Customers are not scannable, but repairs and equipment
/// point at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Customer {
	pub id: EntityId,
	pub tenant_id: TenantId,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

/// A device brought in by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Equipment {
	pub id: EntityId,
	pub tenant_id: TenantId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub customer_id: Option<EntityId>,
	/// Free-form device category ("laptop", "desktop", "printer").
	pub category: String,
	pub brand: String,
	pub model: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub serial_number: Option<String>,
}

/// Workflow position of a repair ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStatus {
	#[default]
	Received,
	Diagnosing,
	AwaitingParts,
	InProgress,
	Ready,
	Delivered,
}

impl RepairStatus {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Received => "received",
			Self::Diagnosing => "diagnosing",
			Self::AwaitingParts => "awaiting_parts",
			Self::InProgress => "in_progress",
			Self::Ready => "ready",
			Self::Delivered => "delivered",
		}
	}
}

/// A repair ticket linking a customer to one piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repair {
	pub id: EntityId,
	pub tenant_id: TenantId,
	pub customer_id: EntityId,
	pub equipment_id: EntityId,
	/// Problem as reported at intake.
	pub problem: String,
	#[serde(default)]
	pub status: RepairStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

/// A spare part in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Part {
	pub id: EntityId,
	pub tenant_id: TenantId,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sku: Option<String>,
	#[serde(default)]
	pub quantity: u32,
	/// Shelf or bin label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
}

/// Any record addressable by an entity code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityRecord {
	Repair(Repair),
	Part(Part),
	Equipment(Equipment),
}

impl EntityRecord {
	pub const fn kind(&self) -> EntityKind {
		match self {
			Self::Repair(_) => EntityKind::Repair,
			Self::Part(_) => EntityKind::Part,
			Self::Equipment(_) => EntityKind::Equipment,
		}
	}

	pub fn id(&self) -> &EntityId {
		match self {
			Self::Repair(r) => &r.id,
			Self::Part(p) => &p.id,
			Self::Equipment(e) => &e.id,
		}
	}

	/// Tenant that owns this record.
	pub fn tenant_id(&self) -> &TenantId {
		match self {
			Self::Repair(r) => &r.tenant_id,
			Self::Part(p) => &p.tenant_id,
			Self::Equipment(e) => &e.tenant_id,
		}
	}

	pub fn key(&self) -> EntityKey {
		EntityKey::new(self.kind(), self.id().clone())
	}

	pub fn reference(&self) -> EntityReference {
		self.key().with_tenant(self.tenant_id().clone())
	}

	/// User-visible text fields, in display order. Used for list filtering.
	pub fn search_fields(&self) -> Vec<&str> {
		let mut fields = vec![self.id().as_str()];
		match self {
			Self::Repair(r) => {
				fields.push(&r.problem);
				fields.push(r.status.as_str());
				fields.extend(r.notes.as_deref());
			}
			Self::Part(p) => {
				fields.push(&p.name);
				fields.extend(p.sku.as_deref());
				fields.extend(p.location.as_deref());
			}
			Self::Equipment(e) => {
				fields.push(&e.category);
				fields.push(&e.brand);
				fields.push(&e.model);
				fields.extend(e.serial_number.as_deref());
			}
		}
		fields
	}
}

impl From<Repair> for EntityRecord {
	fn from(value: Repair) -> Self {
		Self::Repair(value)
	}
}

impl From<Part> for EntityRecord {
	fn from(value: Part) -> Self {
		Self::Part(value)
	}
}

impl From<Equipment> for EntityRecord {
	fn from(value: Equipment) -> Self {
		Self::Equipment(value)
	}
}
