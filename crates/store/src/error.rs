//! Error types for store access and seeding.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures while querying a store.
///
/// Every variant describes a condition that may clear on its own; callers
/// treat them as transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	/// The backend could not be reached or refused the request.
	#[error("store unavailable: {0}")]
	Unavailable(String),

	/// The lookup did not complete in time.
	#[error("store lookup timed out after {0:?}")]
	Timeout(Duration),
}

/// Result type for store queries.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A record was rejected on insert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
	/// Ids must be non-empty and free of `:` so they can be embedded in codes.
	#[error("invalid {collection} id `{id}`: must be non-empty and must not contain `:`")]
	InvalidId {
		/// Collection the record was destined for.
		collection: &'static str,
		/// The offending id.
		id: String,
	},
}

/// Errors that can occur when loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a seed file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A seeded record failed validation.
	#[error(transparent)]
	Record(#[from] RecordError),
}
