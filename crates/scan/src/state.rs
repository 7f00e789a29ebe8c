use std::fmt;

use repairdesk_resolver::FailureKind;

/// Where a scan session is in its attempt lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
	/// Screen not focused; camera released.
	#[default]
	Idle,
	/// Camera running, waiting for a code.
	Scanning,
	/// Parsing captured text.
	Decoding,
	/// Waiting on store lookups.
	Resolving,
	/// Navigation to the detail view is under way.
	Succeeded,
	/// The last attempt failed; only a user retry leaves this state.
	Failed(FailureKind),
}

impl ScanState {
	/// Whether an attempt is awaiting its result.
	pub const fn is_pending(self) -> bool {
		matches!(self, Self::Decoding | Self::Resolving)
	}

	/// Whether new captured text may start an attempt.
	///
	/// A capture during `Decoding` or `Resolving` supersedes the pending one.
	pub const fn accepts_capture(self) -> bool {
		matches!(self, Self::Scanning | Self::Decoding | Self::Resolving)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Scanning => "scanning",
			Self::Decoding => "decoding",
			Self::Resolving => "resolving",
			Self::Succeeded => "succeeded",
			Self::Failed(_) => "failed",
		}
	}
}

impl fmt::Display for ScanState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Failed(kind) => write!(f, "failed ({kind})"),
			other => f.write_str(other.as_str()),
		}
	}
}
