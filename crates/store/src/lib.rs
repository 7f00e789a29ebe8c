//! Entity store boundary for the repair desk.
//!
//! The resolver only ever talks to an [`EntityStore`]: a keyed, read-mostly
//! lookup service with tenant-scoped listing. Production deployments back it
//! with the hosted backend; this crate ships [`MemoryStore`] (seeded from TOML
//! via [`Seed`]) and [`UnreliableStore`], a wrapper that adds latency and
//! injected failures.

pub mod error;
pub mod filter;
pub mod memory;
pub mod record;
pub mod seed;
pub mod store;
pub mod unreliable;

pub use error::{RecordError, SeedError, StoreError, StoreResult};
pub use filter::RecordFilter;
pub use memory::MemoryStore;
pub use record::{Customer, EntityRecord, Equipment, Part, Repair, RepairStatus};
pub use seed::Seed;
pub use store::EntityStore;
pub use unreliable::UnreliableStore;
