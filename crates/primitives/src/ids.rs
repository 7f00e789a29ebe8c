use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EntityKind;

macro_rules! string_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Wraps a raw identifier string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the raw identifier.
			pub fn as_str(&self) -> &str {
				&self.0
			}

			/// Consumes the id, returning the raw string.
			pub fn into_inner(self) -> String {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self::new(value)
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self(value)
			}
		}
	};
}

string_id!(
	/// Opaque store-assigned identifier, unique within its [`EntityKind`].
	EntityId
);

string_id!(
	/// Identifier of the organization that owns a record.
	TenantId
);

/// A decoded entity address with the owning tenant not yet established.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
	pub kind: EntityKind,
	pub id: EntityId,
}

impl EntityKey {
	pub fn new(kind: EntityKind, id: impl Into<EntityId>) -> Self {
		Self { kind, id: id.into() }
	}

	/// Attaches the owning tenant once the store has confirmed it.
	pub fn with_tenant(self, tenant_id: TenantId) -> EntityReference {
		EntityReference {
			kind: self.kind,
			id: self.id,
			tenant_id,
		}
	}
}

impl fmt::Display for EntityKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.kind, self.id)
	}
}

/// A resolved, tenant-scoped entity address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
	pub kind: EntityKind,
	pub id: EntityId,
	pub tenant_id: TenantId,
}

impl EntityReference {
	/// Drops the tenant, returning the bare address.
	pub fn key(&self) -> EntityKey {
		EntityKey {
			kind: self.kind,
			id: self.id.clone(),
		}
	}
}
