//! Core identity types for repair-shop entities and the text format used to
//! embed them in scannable codes.
//!
//! An entity is addressed by its [`EntityKind`] and an opaque [`EntityId`]; every
//! entity belongs to exactly one [`TenantId`]. The code format is `"<kind>:<id>"`
//! (see [`code`]).

/// Encoding and decoding of `kind:id` entity codes.
pub mod code;
/// Identifier newtypes for entities and tenants.
pub mod ids;
/// The closed set of scannable entity kinds.
pub mod kind;

pub use code::{CODE_SEPARATOR, CodeError, EncodedCode, decode, encode, encode_named};
pub use ids::{EntityId, EntityKey, EntityReference, TenantId};
pub use kind::EntityKind;
