//! The `kind:id` entity code format.
//!
//! A code is a single string made of the lowercase kind name and the raw id,
//! joined by exactly one [`CODE_SEPARATOR`]. Codes are generated on demand for
//! display and consumed immediately at scan time; they are never persisted.
//!
//! The format carries no checksum. A well-formed code from an unrelated source
//! decodes successfully and is only rejected once the store has no matching
//! record.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EntityId, EntityKey, EntityKind};

/// Separator between the kind name and the id.
pub const CODE_SEPARATOR: char = ':';

/// Errors produced while building or parsing entity codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
	/// Encoding was asked for a kind name outside the closed set.
	#[error("invalid entity kind `{0}`")]
	InvalidKind(String),

	/// Encoding was asked for an id that is empty or contains the separator.
	#[error("invalid entity id `{0}`: must be non-empty and must not contain `:`")]
	InvalidId(String),

	/// Scanned text is not shaped like `kind:id`.
	#[error("not a recognized entity code")]
	Malformed,

	/// Scanned text is shaped like a code but names an unknown kind.
	#[error("unrecognized entity code type `{0}`")]
	UnknownKind(String),
}

/// Text payload of a scannable entity code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedCode(String);

impl EncodedCode {
	/// Returns the code text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EncodedCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Encodes an entity address as `"<kind>:<id>"`.
pub fn encode(kind: EntityKind, id: &EntityId) -> Result<EncodedCode, CodeError> {
	let raw = id.as_str();
	if raw.is_empty() || raw.contains(CODE_SEPARATOR) {
		return Err(CodeError::InvalidId(raw.to_owned()));
	}
	Ok(EncodedCode(format!("{}{CODE_SEPARATOR}{raw}", kind.as_str())))
}

/// Encodes from a string-typed kind name, as received from untyped callers.
pub fn encode_named(kind: &str, id: &str) -> Result<EncodedCode, CodeError> {
	let kind = EntityKind::from_name(kind).ok_or_else(|| CodeError::InvalidKind(kind.to_owned()))?;
	encode(kind, &EntityId::from(id))
}

/// Decodes scanned text into an entity address.
///
/// The text must split on `:` into exactly two non-empty segments, otherwise
/// it is [`CodeError::Malformed`]. The first segment must then be one of the
/// canonical kind names, otherwise it is [`CodeError::UnknownKind`]. The text
/// is taken verbatim; no trimming or case folding is applied.
pub fn decode(text: &str) -> Result<EntityKey, CodeError> {
	let Some((kind, id)) = text.split_once(CODE_SEPARATOR) else {
		return Err(CodeError::Malformed);
	};
	if kind.is_empty() || id.is_empty() || id.contains(CODE_SEPARATOR) {
		return Err(CodeError::Malformed);
	}
	let kind = EntityKind::from_name(kind).ok_or_else(|| CodeError::UnknownKind(kind.to_owned()))?;
	Ok(EntityKey::new(kind, id))
}
