use std::sync::Arc;

use repairdesk_primitives::TenantId;
use repairdesk_resolver::{FailureKind, NavigationTarget, ResolveError, Resolver};
use repairdesk_store::EntityStore;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::{CameraBusy, CameraDevice, CameraLease, ScanState};

/// Errors from driving a session out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
	#[error(transparent)]
	CameraBusy(#[from] CameraBusy),

	#[error("cannot {action} while {state}")]
	InvalidState { action: &'static str, state: ScanState },
}

/// Result of one attempt, tagged with the attempt generation.
#[derive(Debug)]
pub struct ScanEvent {
	pub generation: u64,
	pub result: Result<NavigationTarget, ResolveError>,
}

/// What the screen should do after an attempt finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
	/// Open the detail view. The camera has already been released.
	Navigate(NavigationTarget),
	/// Show `message` with a scan-again affordance.
	Failed { kind: FailureKind, message: &'static str },
}

struct InFlightResolve {
	cancel: CancellationToken,
}

/// Scan state for one scanning screen.
///
/// Every attempt gets a new generation. Starting an attempt cancels the
/// previous in-flight resolve, and results are only applied when their
/// generation is still current, so a slow earlier lookup can never navigate
/// after a later scan.
///
/// [`submit`](Self::submit) spawns onto the current Tokio runtime.
pub struct ScanSession<S> {
	resolver: Arc<Resolver<S>>,
	tenant: TenantId,
	camera: CameraDevice,
	lease: Option<CameraLease>,
	state: ScanState,
	generation: u64,
	in_flight: Option<InFlightResolve>,
	events_tx: mpsc::UnboundedSender<ScanEvent>,
	events_rx: mpsc::UnboundedReceiver<ScanEvent>,
}

impl<S> ScanSession<S>
where
	S: EntityStore + 'static,
{
	/// Creates an idle session resolving codes for `tenant`.
	pub fn new(resolver: Arc<Resolver<S>>, tenant: TenantId, camera: CameraDevice) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		Self {
			resolver,
			tenant,
			camera,
			lease: None,
			state: ScanState::Idle,
			generation: 0,
			in_flight: None,
			events_tx,
			events_rx,
		}
	}

	pub fn state(&self) -> ScanState {
		self.state
	}

	pub fn holds_camera(&self) -> bool {
		self.lease.is_some()
	}

	/// Screen gained focus: take the camera and start scanning.
	pub fn focus(&mut self) -> Result<(), SessionError> {
		match self.state {
			ScanState::Idle => {
				self.lease = Some(self.camera.try_acquire()?);
				self.state = ScanState::Scanning;
				debug!(tenant = %self.tenant, camera = self.camera.name(), "scan.session.focus");
				Ok(())
			}
			ScanState::Scanning => Ok(()),
			state => Err(SessionError::InvalidState { action: "focus", state }),
		}
	}

	/// Starts an attempt for text captured by the camera.
	///
	/// Decoding finishes before any lookup is issued; a decode failure ends
	/// the attempt without touching the store. Returns the attempt generation.
	pub fn submit(&mut self, raw: &str) -> Result<u64, SessionError> {
		if !self.state.accepts_capture() {
			return Err(SessionError::InvalidState {
				action: "submit",
				state: self.state,
			});
		}

		self.cancel_in_flight();
		self.generation = self.generation.wrapping_add(1);
		let generation = self.generation;
		self.state = ScanState::Decoding;

		let key = match self.resolver.decode(raw) {
			Ok(key) => key,
			Err(err) => {
				if self.events_tx.send(ScanEvent { generation, result: Err(err) }).is_err() {
					trace!(generation, "scan.event.dropped");
				}
				return Ok(generation);
			}
		};

		self.state = ScanState::Resolving;
		let cancel = CancellationToken::new();
		self.in_flight = Some(InFlightResolve { cancel: cancel.clone() });

		let resolver = Arc::clone(&self.resolver);
		let tenant = self.tenant.clone();
		let events_tx = self.events_tx.clone();
		trace!(generation, %key, "scan.resolve.spawn");
		tokio::spawn(async move {
			let result = tokio::select! {
				_ = cancel.cancelled() => {
					trace!(generation, "scan.resolve.cancelled");
					return;
				}
				result = resolver.resolve_and_authorize(&key, &tenant) => result,
			};

			if cancel.is_cancelled() {
				return;
			}

			if events_tx.send(ScanEvent { generation, result }).is_err() {
				trace!(generation, "scan.event.dropped");
			}
		});

		Ok(generation)
	}

	/// Applies a finished attempt, returning what the screen should do.
	///
	/// Events from superseded or abandoned attempts are dropped and yield
	/// `None`.
	pub fn apply(&mut self, event: ScanEvent) -> Option<ScanOutcome> {
		if event.generation != self.generation || !self.state.is_pending() {
			trace!(
				generation = event.generation,
				current = self.generation,
				state = %self.state,
				"scan.result.stale"
			);
			return None;
		}

		self.in_flight = None;
		match event.result {
			Ok(target) => {
				info!(generation = event.generation, reference = %target.reference.key(), screen = target.screen.as_str(), "scan.result.navigate");
				self.state = ScanState::Succeeded;
				self.lease = None;
				Some(ScanOutcome::Navigate(target))
			}
			Err(err) => {
				let kind = err.kind();
				info!(generation = event.generation, failure = %kind, error = %err, "scan.result.failed");
				self.state = ScanState::Failed(kind);
				Some(ScanOutcome::Failed {
					kind,
					message: kind.user_message(),
				})
			}
		}
	}

	/// Waits for the current attempt's outcome.
	///
	/// Returns `None` immediately when no attempt is pending. Cancel-safe.
	pub async fn next_outcome(&mut self) -> Option<ScanOutcome> {
		while self.state.is_pending() {
			let event = self.events_rx.recv().await?;
			if let Some(outcome) = self.apply(event) {
				return Some(outcome);
			}
		}
		None
	}

	/// Applies any already-delivered events without waiting.
	pub fn try_next_outcome(&mut self) -> Option<ScanOutcome> {
		while let Ok(event) = self.events_rx.try_recv() {
			if let Some(outcome) = self.apply(event) {
				return Some(outcome);
			}
		}
		None
	}

	/// User chose to scan again after a failure.
	pub fn retry(&mut self) -> Result<(), SessionError> {
		match self.state {
			ScanState::Failed(_) => {
				self.state = ScanState::Scanning;
				Ok(())
			}
			state => Err(SessionError::InvalidState { action: "retry", state }),
		}
	}

	/// The detail view opened after a successful scan.
	pub fn navigation_complete(&mut self) -> Result<(), SessionError> {
		match self.state {
			ScanState::Succeeded => {
				self.state = ScanState::Idle;
				Ok(())
			}
			state => Err(SessionError::InvalidState {
				action: "complete navigation",
				state,
			}),
		}
	}

	/// Screen lost focus: cancel pending work and release the camera.
	pub fn blur(&mut self) {
		self.cancel_in_flight();
		// Anything already queued belongs to an abandoned attempt.
		self.generation = self.generation.wrapping_add(1);
		self.lease = None;
		self.state = ScanState::Idle;
		debug!(tenant = %self.tenant, "scan.session.blur");
	}

	fn cancel_in_flight(&mut self) {
		if let Some(in_flight) = self.in_flight.take() {
			in_flight.cancel.cancel();
		}
	}
}

impl<S> Drop for ScanSession<S> {
	fn drop(&mut self) {
		if let Some(in_flight) = self.in_flight.take() {
			in_flight.cancel.cancel();
		}
	}
}
