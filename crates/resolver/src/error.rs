use std::fmt;

use repairdesk_primitives::{CodeError, EntityKey, TenantId};
use repairdesk_store::StoreError;
use thiserror::Error;

/// Shown for text that is not shaped like an entity code.
pub const UNRECOGNIZED_MESSAGE: &str = "Not a recognized code. Scan again.";

/// Shown for a well-formed code naming an unknown entity type.
pub const UNKNOWN_TYPE_MESSAGE: &str = "Code type not recognized. Scan again.";

/// Shown both when the record does not exist and when it belongs to another
/// tenant. The two cases must stay indistinguishable to the user.
pub const UNAVAILABLE_MESSAGE: &str = "No record found for this code in your organization. Scan again.";

/// Shown when the store could not be reached after retrying.
pub const TRANSIENT_MESSAGE: &str = "Could not reach the server. Check your connection and scan again.";

/// Fieldless category of a failed scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
	MalformedCode,
	UnknownKind,
	NotFound,
	CrossTenantAccess,
	TransientError,
}

impl FailureKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::MalformedCode => "malformed_code",
			Self::UnknownKind => "unknown_kind",
			Self::NotFound => "not_found",
			Self::CrossTenantAccess => "cross_tenant_access",
			Self::TransientError => "transient_error",
		}
	}

	/// Text the presentation layer shows for this failure.
	pub const fn user_message(self) -> &'static str {
		match self {
			Self::MalformedCode => UNRECOGNIZED_MESSAGE,
			Self::UnknownKind => UNKNOWN_TYPE_MESSAGE,
			Self::NotFound | Self::CrossTenantAccess => UNAVAILABLE_MESSAGE,
			Self::TransientError => TRANSIENT_MESSAGE,
		}
	}
}

impl fmt::Display for FailureKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Why a scanned code did not produce a navigation target.
///
/// `Display` is diagnostic text and may name the real owner of a record; only
/// [`ResolveError::user_message`] is fit for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
	#[error("malformed entity code")]
	MalformedCode,

	#[error("unknown entity code type `{0}`")]
	UnknownKind(String),

	#[error("{key} does not exist")]
	NotFound { key: EntityKey },

	#[error("{key} is owned by tenant `{owner}`, requested by tenant `{caller}`")]
	CrossTenantAccess { key: EntityKey, owner: TenantId, caller: TenantId },

	#[error("store lookup failed after {attempts} attempt(s): {source}")]
	Transient {
		#[source]
		source: StoreError,
		attempts: u32,
	},
}

impl ResolveError {
	pub const fn kind(&self) -> FailureKind {
		match self {
			Self::MalformedCode => FailureKind::MalformedCode,
			Self::UnknownKind(_) => FailureKind::UnknownKind,
			Self::NotFound { .. } => FailureKind::NotFound,
			Self::CrossTenantAccess { .. } => FailureKind::CrossTenantAccess,
			Self::Transient { .. } => FailureKind::TransientError,
		}
	}

	pub const fn user_message(&self) -> &'static str {
		self.kind().user_message()
	}
}

impl From<CodeError> for ResolveError {
	fn from(err: CodeError) -> Self {
		match err {
			CodeError::UnknownKind(kind) | CodeError::InvalidKind(kind) => Self::UnknownKind(kind),
			CodeError::Malformed | CodeError::InvalidId(_) => Self::MalformedCode,
		}
	}
}
