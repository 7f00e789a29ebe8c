use std::sync::Arc;
use std::time::Duration;

use repairdesk_store::{MemoryStore, Part, RepairStatus, Seed, StoreError, UnreliableStore};

use super::*;
use crate::FailureKind;

const SEED: &str = r#"
	[[customers]]
	id = "c1"
	tenant_id = "acme"
	name = "Ada Lovelace"

	[[customers]]
	id = "c9"
	tenant_id = "globex"
	name = "Hank Scorpio"

	[[equipment]]
	id = "e1"
	tenant_id = "acme"
	customer_id = "c1"
	category = "laptop"
	brand = "Lenovo"
	model = "T480"

	[[repairs]]
	id = "r1"
	tenant_id = "acme"
	customer_id = "c1"
	equipment_id = "e1"
	problem = "no power"
	status = "diagnosing"

	[[repairs]]
	id = "r2"
	tenant_id = "acme"
	customer_id = "c9"
	equipment_id = "e-missing"
	problem = "cracked hinge"

	[[parts]]
	id = "abc123"
	tenant_id = "acme"
	name = "65W charger"
	quantity = 3

	[[parts]]
	id = "g1"
	tenant_id = "globex"
	name = "Fan"
	quantity = 1
"#;

fn store() -> Arc<UnreliableStore<MemoryStore>> {
	let seed = Seed::parse(SEED).unwrap();
	Arc::new(UnreliableStore::new(MemoryStore::from_seed(seed).unwrap()))
}

fn resolver(store: &Arc<UnreliableStore<MemoryStore>>) -> Resolver<Arc<UnreliableStore<MemoryStore>>> {
	Resolver::new(Arc::clone(store)).with_retry_policy(RetryPolicy {
		retries: 1,
		backoff: Duration::from_millis(10),
		timeout: None,
	})
}

fn acme() -> TenantId {
	"acme".into()
}

#[tokio::test]
async fn resolves_part_in_callers_tenant() {
	let store = store();
	let target = resolver(&store).decode_and_resolve("part:abc123", &acme()).await.unwrap();

	assert_eq!(target.screen, Screen::PartDetail);
	assert_eq!(target.reference.kind, EntityKind::Part);
	assert_eq!(target.reference.id.as_str(), "abc123");
	assert_eq!(target.reference.tenant_id, acme());
	match target.payload {
		EntityPayload::Part(Part { name, quantity, .. }) => {
			assert_eq!(name, "65W charger");
			assert_eq!(quantity, 3);
		}
		other => panic!("expected part payload, got {other:?}"),
	}
}

#[tokio::test]
async fn resolves_equipment() {
	let store = store();
	let target = resolver(&store).decode_and_resolve("equipment:e1", &acme()).await.unwrap();
	assert_eq!(target.screen, Screen::EquipmentDetail);
	assert_eq!(target.payload.kind(), EntityKind::Equipment);
}

#[tokio::test]
async fn repair_is_hydrated_with_customer_and_equipment() {
	let store = store();
	let target = resolver(&store).decode_and_resolve("repair:r1", &acme()).await.unwrap();

	assert_eq!(target.screen, Screen::RepairDetail);
	let EntityPayload::Repair(detail) = target.payload else {
		panic!("expected repair payload");
	};
	assert_eq!(detail.repair.status, RepairStatus::Diagnosing);
	assert_eq!(detail.customer.map(|c| c.name), Some("Ada Lovelace".to_string()));
	assert_eq!(detail.equipment.map(|e| e.model), Some("T480".to_string()));
	// repair + customer + equipment
	assert_eq!(store.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn repair_hydration_lookups_run_concurrently() {
	let seed = Seed::parse(SEED).unwrap();
	let store = Arc::new(UnreliableStore::new(MemoryStore::from_seed(seed).unwrap()).with_latency(Duration::from_millis(100)));
	let resolver = resolver(&store);

	let start = tokio::time::Instant::now();
	resolver.decode_and_resolve("repair:r1", &acme()).await.unwrap();
	let elapsed = start.elapsed();

	assert!(elapsed >= Duration::from_millis(200), "elapsed {elapsed:?}");
	assert!(elapsed < Duration::from_millis(300), "hydration was sequential: {elapsed:?}");
}

#[tokio::test]
async fn repair_with_missing_or_foreign_relations_still_resolves() {
	let store = store();
	let target = resolver(&store).decode_and_resolve("repair:r2", &acme()).await.unwrap();
	let EntityPayload::Repair(detail) = target.payload else {
		panic!("expected repair payload");
	};
	assert!(detail.customer.is_none(), "customer from another tenant must not leak");
	assert!(detail.equipment.is_none());
}

#[tokio::test]
async fn absent_id_is_not_found_for_every_tenant() {
	let store = store();
	let resolver = resolver(&store);
	for tenant in ["acme", "globex", "nobody"] {
		let err = resolver.decode_and_resolve("part:missing", &tenant.into()).await.unwrap_err();
		assert_eq!(err.kind(), FailureKind::NotFound, "tenant {tenant}");
	}
}

#[tokio::test]
async fn foreign_record_is_cross_tenant_with_generic_message() {
	let store = store();
	let resolver = resolver(&store);

	let err = resolver.decode_and_resolve("part:g1", &acme()).await.unwrap_err();
	assert_eq!(
		err,
		ResolveError::CrossTenantAccess {
			key: EntityKey::new(EntityKind::Part, "g1"),
			owner: "globex".into(),
			caller: acme(),
		}
	);

	let not_found = resolver.decode_and_resolve("part:nope", &acme()).await.unwrap_err();
	assert_eq!(err.user_message(), not_found.user_message());
}

#[tokio::test]
async fn decode_failures_never_reach_the_store() {
	let store = store();
	let resolver = resolver(&store);

	let err = resolver.decode_and_resolve("repair-abc123", &acme()).await.unwrap_err();
	assert_eq!(err, ResolveError::MalformedCode);

	let err = resolver.decode_and_resolve("vehicle:99", &acme()).await.unwrap_err();
	assert_eq!(err, ResolveError::UnknownKind("vehicle".into()));

	assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn single_transient_failure_is_retried() {
	let store = store();
	store.fail_next(1);
	let target = resolver(&store).decode_and_resolve("part:abc123", &acme()).await.unwrap();
	assert_eq!(target.reference.id.as_str(), "abc123");
	assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn repeated_transient_failure_surfaces() {
	let store = store();
	store.fail_next(2);
	let err = resolver(&store).decode_and_resolve("part:abc123", &acme()).await.unwrap_err();
	assert_eq!(err.kind(), FailureKind::TransientError);
	assert!(matches!(
		err,
		ResolveError::Transient {
			source: StoreError::Unavailable(_),
			attempts: 2
		}
	));
}

/// Answers record lookups but cannot reach the customer table.
struct CustomerOutage(MemoryStore);

#[async_trait::async_trait]
impl EntityStore for CustomerOutage {
	async fn get(&self, key: &EntityKey) -> repairdesk_store::StoreResult<Option<EntityRecord>> {
		self.0.get(key).await
	}

	async fn get_customer(&self, _id: &EntityId) -> repairdesk_store::StoreResult<Option<Customer>> {
		Err(StoreError::Unavailable("customer table offline".into()))
	}

	async fn list(&self, kind: EntityKind, tenant: &TenantId) -> repairdesk_store::StoreResult<Vec<EntityRecord>> {
		self.0.list(kind, tenant).await
	}
}

#[tokio::test]
async fn transient_failure_during_hydration_fails_resolve() {
	let seed = Seed::parse(SEED).unwrap();
	let resolver = Resolver::new(CustomerOutage(MemoryStore::from_seed(seed).unwrap())).with_retry_policy(RetryPolicy::no_retry());

	let err = resolver.decode_and_resolve("repair:r1", &acme()).await.unwrap_err();
	assert_eq!(err.kind(), FailureKind::TransientError);

	// Kinds that need no hydration are unaffected.
	assert!(resolver.decode_and_resolve("part:abc123", &acme()).await.is_ok());
}
