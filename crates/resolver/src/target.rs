use repairdesk_primitives::{EntityKind, EntityReference};
use repairdesk_store::{Customer, Equipment, Part, Repair};
use serde::Serialize;

/// Detail view the presentation layer opens for a resolved entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
	RepairDetail,
	PartDetail,
	EquipmentDetail,
}

impl Screen {
	pub const fn for_kind(kind: EntityKind) -> Self {
		match kind {
			EntityKind::Repair => Self::RepairDetail,
			EntityKind::Part => Self::PartDetail,
			EntityKind::Equipment => Self::EquipmentDetail,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::RepairDetail => "repair_detail",
			Self::PartDetail => "part_detail",
			Self::EquipmentDetail => "equipment_detail",
		}
	}
}

/// A repair with its customer and equipment joined in.
///
/// Either side is `None` when the related record is missing or not visible to
/// the caller's tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairDetail {
	pub repair: Repair,
	pub customer: Option<Customer>,
	pub equipment: Option<Equipment>,
}

/// Record data handed to the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityPayload {
	Repair(Box<RepairDetail>),
	Part(Part),
	Equipment(Equipment),
}

impl EntityPayload {
	pub const fn kind(&self) -> EntityKind {
		match self {
			Self::Repair(_) => EntityKind::Repair,
			Self::Part(_) => EntityKind::Part,
			Self::Equipment(_) => EntityKind::Equipment,
		}
	}
}

/// Where a successful scan navigates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
	pub screen: Screen,
	pub reference: EntityReference,
	pub payload: EntityPayload,
}
