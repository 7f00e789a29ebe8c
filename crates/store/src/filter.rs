//! Client-side list filtering.

use crate::EntityRecord;

/// Case-insensitive substring filter over a record's visible text fields.
///
/// An empty or whitespace-only query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
	needle: String,
}

impl RecordFilter {
	pub fn new(query: &str) -> Self {
		Self {
			needle: query.trim().to_lowercase(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.needle.is_empty()
	}

	pub fn matches(&self, record: &EntityRecord) -> bool {
		self.is_empty() || record.search_fields().iter().any(|field| field.to_lowercase().contains(&self.needle))
	}

	/// Keeps the matching records, preserving order.
	pub fn apply(&self, records: Vec<EntityRecord>) -> Vec<EntityRecord> {
		if self.is_empty() {
			return records;
		}
		records.into_iter().filter(|r| self.matches(r)).collect()
	}
}
