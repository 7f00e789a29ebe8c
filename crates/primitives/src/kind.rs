use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a record that can be addressed by an entity code.
///
/// The set is closed: an unrecognized kind name is an error at every boundary,
/// never a new kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
	/// A repair ticket.
	Repair,
	/// A spare part in inventory.
	Part,
	/// A customer's equipment record.
	Equipment,
}

impl EntityKind {
	/// Every kind, in declaration order.
	pub const ALL: [Self; 3] = [Self::Repair, Self::Part, Self::Equipment];

	/// Returns the canonical lowercase name used in entity codes.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Repair => "repair",
			Self::Part => "part",
			Self::Equipment => "equipment",
		}
	}

	/// Looks up a kind by its canonical name.
	///
	/// Matching is exact and case-sensitive: `"Part"` is not a kind.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == name)
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
