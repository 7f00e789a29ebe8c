//! TOML seed documents for [`MemoryStore`](crate::MemoryStore).
//!
//! ```toml
//! [[customers]]
//! id = "c1"
//! tenant_id = "acme"
//! name = "Ada Lovelace"
//!
//! [[equipment]]
//! id = "e1"
//! tenant_id = "acme"
//! customer_id = "c1"
//! category = "laptop"
//! brand = "Lenovo"
//! model = "T480"
//!
//! [[repairs]]
//! id = "r1"
//! tenant_id = "acme"
//! customer_id = "c1"
//! equipment_id = "e1"
//! problem = "no power"
//! status = "diagnosing"
//!
//! [[parts]]
//! id = "p1"
//! tenant_id = "acme"
//! name = "65W charger"
//! quantity = 3
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{Customer, Equipment, Part, Repair, SeedError};

/// Records to preload into a store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
	#[serde(default)]
	pub customers: Vec<Customer>,
	#[serde(default)]
	pub equipment: Vec<Equipment>,
	#[serde(default)]
	pub repairs: Vec<Repair>,
	#[serde(default)]
	pub parts: Vec<Part>,
}

impl Seed {
	/// Parses a TOML seed document.
	pub fn parse(input: &str) -> Result<Self, SeedError> {
		Ok(toml::from_str(input)?)
	}

	/// Loads a seed document from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| SeedError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}
}
