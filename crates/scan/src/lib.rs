//! Scan sessions for entity codes.
//!
//! A [`ScanSession`] belongs to one scanning screen. It owns the camera while
//! the screen is focused, runs at most one resolve at a time, and guarantees
//! that only the latest attempt's result can drive navigation.
//!
//! # Attempt lifecycle
//!
//! ```text
//! Idle -> Scanning -> Decoding -> Resolving -> Succeeded | Failed(kind)
//!   ^         ^                                   |            |
//!   |         +------------ retry() --------------+------------+
//!   +---------------- navigation_complete() ------+
//! ```
//!
//! `blur()` returns to `Idle` from any state, cancelling the in-flight resolve
//! and releasing the camera.

mod camera;
mod session;
mod state;

pub use camera::{CameraBusy, CameraDevice, CameraLease};
pub use session::{ScanEvent, ScanOutcome, ScanSession, SessionError};
pub use state::ScanState;
