//! Entity code resolution.
//!
//! Turns raw scanned text into a [`NavigationTarget`] for the caller's tenant,
//! or a typed [`ResolveError`] the presentation layer can render with a
//! re-scan affordance.
//!
//! Resolution runs in two strictly ordered steps:
//!
//! 1. **Decode**: parse `kind:id` text. Pure; never touches the store.
//! 2. **Resolve**: fetch the record, check existence before tenancy, then
//!    hydrate the fields the detail view needs. Store lookups are retried per
//!    [`RetryPolicy`] before surfacing [`FailureKind::TransientError`].
//!
//! The caller's tenant is always an explicit argument; there is no ambient
//! session state.

mod error;
mod resolver;
mod retry;
mod target;

pub use error::{FailureKind, ResolveError, TRANSIENT_MESSAGE, UNAVAILABLE_MESSAGE, UNKNOWN_TYPE_MESSAGE, UNRECOGNIZED_MESSAGE};
pub use resolver::Resolver;
pub use retry::RetryPolicy;
pub use target::{EntityPayload, NavigationTarget, RepairDetail, Screen};
