use repairdesk_config::ConfigError;
use repairdesk_primitives::CodeError;
use repairdesk_scan::SessionError;
use repairdesk_store::{RecordError, SeedError, StoreError};
use thiserror::Error;

/// Everything that can stop a command before it produces output.
#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Seed(#[from] SeedError),

	#[error(transparent)]
	Record(#[from] RecordError),

	#[error(transparent)]
	Code(#[from] CodeError),

	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Session(#[from] SessionError),

	#[error("no tenant given: pass --tenant or set `tenant` in the config file")]
	MissingTenant,

	#[error("unknown entity kind `{0}` (expected repair, part or equipment)")]
	UnknownKind(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
