use std::sync::Arc;
use std::time::Duration;

use repairdesk_primitives::EntityKind;
use repairdesk_resolver::{FailureKind, Resolver, RetryPolicy, Screen};
use repairdesk_scan::{CameraBusy, CameraDevice, ScanOutcome, ScanSession, ScanState, SessionError};
use repairdesk_store::{MemoryStore, Seed, UnreliableStore};
use thiserror as _;
use tokio_util as _;
use tracing as _;

const SEED: &str = r#"
	[[customers]]
	id = "c1"
	tenant_id = "acme"
	name = "Ada Lovelace"

	[[equipment]]
	id = "e1"
	tenant_id = "acme"
	customer_id = "c1"
	category = "desktop"
	brand = "Dell"
	model = "OptiPlex 7050"

	[[repairs]]
	id = "r1"
	tenant_id = "acme"
	customer_id = "c1"
	equipment_id = "e1"
	problem = "fan noise"

	[[parts]]
	id = "abc123"
	tenant_id = "acme"
	name = "92mm fan"
	quantity = 5

	[[parts]]
	id = "g1"
	tenant_id = "globex"
	name = "PSU"
	quantity = 1
"#;

type Store = Arc<UnreliableStore<MemoryStore>>;

fn fixture(latency: Duration) -> (Store, Arc<Resolver<Store>>) {
	let seed = Seed::parse(SEED).unwrap();
	let store = Arc::new(UnreliableStore::new(MemoryStore::from_seed(seed).unwrap()).with_latency(latency));
	let resolver = Arc::new(Resolver::new(Arc::clone(&store)).with_retry_policy(RetryPolicy {
		retries: 1,
		backoff: Duration::from_millis(5),
		timeout: None,
	}));
	(store, resolver)
}

fn session(resolver: &Arc<Resolver<Store>>, camera: &CameraDevice) -> ScanSession<Store> {
	ScanSession::new(Arc::clone(resolver), "acme".into(), camera.clone())
}

#[tokio::test]
async fn successful_scan_navigates_and_releases_camera() {
	let (_, resolver) = fixture(Duration::ZERO);
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);

	session.focus().unwrap();
	assert!(camera.is_in_use());
	assert_eq!(session.state(), ScanState::Scanning);

	session.submit("repair:r1").unwrap();
	let Some(ScanOutcome::Navigate(target)) = session.next_outcome().await else {
		panic!("expected navigation");
	};
	assert_eq!(target.screen, Screen::RepairDetail);
	assert_eq!(target.reference.kind, EntityKind::Repair);
	assert_eq!(session.state(), ScanState::Succeeded);
	assert!(!camera.is_in_use());

	session.navigation_complete().unwrap();
	assert_eq!(session.state(), ScanState::Idle);
}

#[tokio::test]
async fn malformed_code_fails_without_store_lookup() {
	let (store, resolver) = fixture(Duration::ZERO);
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	session.submit("repair-abc123").unwrap();
	let outcome = session.next_outcome().await.unwrap();
	assert_eq!(
		outcome,
		ScanOutcome::Failed {
			kind: FailureKind::MalformedCode,
			message: FailureKind::MalformedCode.user_message(),
		}
	);
	assert_eq!(store.calls(), 0);
	assert!(camera.is_in_use(), "failures keep the camera running");
}

#[tokio::test]
async fn failure_requires_explicit_retry() {
	let (_, resolver) = fixture(Duration::ZERO);
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	session.submit("vehicle:99").unwrap();
	let outcome = session.next_outcome().await.unwrap();
	assert!(matches!(outcome, ScanOutcome::Failed { kind: FailureKind::UnknownKind, .. }));
	assert_eq!(session.state(), ScanState::Failed(FailureKind::UnknownKind));

	let err = session.submit("part:abc123").unwrap_err();
	assert_eq!(
		err,
		SessionError::InvalidState {
			action: "submit",
			state: ScanState::Failed(FailureKind::UnknownKind)
		}
	);

	session.retry().unwrap();
	session.submit("part:abc123").unwrap();
	assert!(matches!(session.next_outcome().await, Some(ScanOutcome::Navigate(_))));
}

#[tokio::test]
async fn cross_tenant_reads_like_not_found() {
	let (_, resolver) = fixture(Duration::ZERO);
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	session.submit("part:g1").unwrap();
	let Some(ScanOutcome::Failed { kind, message: cross }) = session.next_outcome().await else {
		panic!("expected failure");
	};
	assert_eq!(kind, FailureKind::CrossTenantAccess);

	session.retry().unwrap();
	session.submit("part:does-not-exist").unwrap();
	let Some(ScanOutcome::Failed { kind, message: missing }) = session.next_outcome().await else {
		panic!("expected failure");
	};
	assert_eq!(kind, FailureKind::NotFound);
	assert_eq!(cross, missing);
}

#[tokio::test(start_paused = true)]
async fn second_rapid_scan_supersedes_first() {
	let (_, resolver) = fixture(Duration::from_millis(100));
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	let first = session.submit("part:abc123").unwrap();
	let second = session.submit("equipment:e1").unwrap();
	assert!(second > first);

	let Some(ScanOutcome::Navigate(target)) = session.next_outcome().await else {
		panic!("expected navigation");
	};
	assert_eq!(target.screen, Screen::EquipmentDetail);
	assert_eq!(target.reference.id.as_str(), "e1");

	tokio::time::sleep(Duration::from_secs(1)).await;
	assert_eq!(session.try_next_outcome(), None, "first scan must not surface");
}

#[tokio::test(start_paused = true)]
async fn blur_cancels_in_flight_resolve() {
	let (_, resolver) = fixture(Duration::from_millis(100));
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	session.submit("part:abc123").unwrap();
	assert_eq!(session.state(), ScanState::Resolving);
	session.blur();

	assert_eq!(session.state(), ScanState::Idle);
	assert!(!camera.is_in_use());
	tokio::time::sleep(Duration::from_secs(1)).await;
	assert_eq!(session.try_next_outcome(), None);
	assert_eq!(session.next_outcome().await, None);
}

#[tokio::test(start_paused = true)]
async fn blur_mid_lookup_skips_hydration() {
	let (store, resolver) = fixture(Duration::from_millis(100));
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	session.submit("repair:r1").unwrap();
	tokio::time::sleep(Duration::from_millis(50)).await;
	assert_eq!(store.calls(), 1);
	session.blur();

	tokio::time::sleep(Duration::from_secs(1)).await;
	assert_eq!(store.calls(), 1, "customer and equipment lookups must not start");
	assert_eq!(session.try_next_outcome(), None);
}

#[tokio::test(start_paused = true)]
async fn dropping_session_mid_lookup_skips_hydration() {
	let (store, resolver) = fixture(Duration::from_millis(100));
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	session.submit("repair:r1").unwrap();
	tokio::time::sleep(Duration::from_millis(50)).await;
	assert_eq!(store.calls(), 1);
	drop(session);
	assert!(!camera.is_in_use());

	tokio::time::sleep(Duration::from_secs(1)).await;
	assert_eq!(store.calls(), 1, "customer and equipment lookups must not start");
}

#[tokio::test]
async fn camera_is_exclusive_between_sessions() {
	let (_, resolver) = fixture(Duration::ZERO);
	let camera = CameraDevice::new("rear");
	let mut first = session(&resolver, &camera);
	let mut second = session(&resolver, &camera);

	first.focus().unwrap();
	assert_eq!(second.focus().unwrap_err(), SessionError::CameraBusy(CameraBusy("rear".to_string())));
	assert_eq!(second.state(), ScanState::Idle);

	first.blur();
	second.focus().unwrap();
	assert!(second.holds_camera());

	drop(second);
	assert!(!camera.is_in_use());
}

#[tokio::test]
async fn submit_before_focus_is_rejected() {
	let (_, resolver) = fixture(Duration::ZERO);
	let mut session = session(&resolver, &CameraDevice::new("rear"));
	assert!(matches!(
		session.submit("part:abc123"),
		Err(SessionError::InvalidState { state: ScanState::Idle, .. })
	));
}

#[tokio::test]
async fn transient_failure_is_retried_once_before_surfacing() {
	let (store, resolver) = fixture(Duration::ZERO);
	let camera = CameraDevice::new("rear");
	let mut session = session(&resolver, &camera);
	session.focus().unwrap();

	store.fail_next(1);
	session.submit("part:abc123").unwrap();
	assert!(matches!(session.next_outcome().await, Some(ScanOutcome::Navigate(_))));

	session.navigation_complete().unwrap();
	session.focus().unwrap();
	store.fail_next(2);
	session.submit("part:abc123").unwrap();
	let outcome = session.next_outcome().await.unwrap();
	assert!(matches!(outcome, ScanOutcome::Failed { kind: FailureKind::TransientError, .. }));
}
