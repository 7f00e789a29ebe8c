use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

/// The camera is held by another scan session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("camera `{0}` is in use by another scanner")]
pub struct CameraBusy(pub String);

/// An exclusive capture device shared between scanning screens.
///
/// Clones refer to the same device.
#[derive(Debug, Clone)]
pub struct CameraDevice {
	name: Arc<str>,
	slot: Arc<Semaphore>,
}

impl CameraDevice {
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			slot: Arc::new(Semaphore::new(1)),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Takes exclusive ownership of the device without waiting.
	pub fn try_acquire(&self) -> Result<CameraLease, CameraBusy> {
		let permit = Arc::clone(&self.slot)
			.try_acquire_owned()
			.map_err(|_| CameraBusy(self.name.to_string()))?;
		trace!(camera = %self.name, "scan.camera.acquired");
		Ok(CameraLease {
			name: Arc::clone(&self.name),
			_permit: permit,
		})
	}

	pub fn is_in_use(&self) -> bool {
		self.slot.available_permits() == 0
	}
}

/// Exclusive ownership of a [`CameraDevice`]. Dropping the lease stops the
/// camera and frees it for the next session.
#[derive(Debug)]
pub struct CameraLease {
	name: Arc<str>,
	_permit: OwnedSemaphorePermit,
}

impl Drop for CameraLease {
	fn drop(&mut self) {
		trace!(camera = %self.name, "scan.camera.released");
	}
}
