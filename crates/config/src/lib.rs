//! Configuration for the repair desk tools.
//!
//! Configuration is a TOML file. Every key is optional; omitted keys take the
//! defaults shown below, and unknown keys are rejected.
//!
//! ```toml
//! # Tenant used when no --tenant flag is given.
//! tenant = "acme"
//! # Seed data for the in-memory store, relative to this file.
//! seed = "shop.toml"
//! camera = "rear"
//!
//! [resolver]
//! retries = 1
//! retry_backoff_ms = 200
//! # 0 disables the per-lookup bound.
//! lookup_timeout_ms = 10000
//!
//! [store]
//! latency_ms = 0
//! fail_first = 0
//!
//! [log]
//! level = "info"
//! ```
//!
//! # Configuration Files
//!
//! The default location is `$XDG_CONFIG_HOME/repairdesk/config.toml` (or the
//! platform equivalent). A missing default file is not an error.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, Result};
use serde::Deserialize;

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Tenant used when none is given on the command line.
	pub tenant: Option<String>,
	/// Seed file for the in-memory store.
	pub seed: Option<PathBuf>,
	/// Camera device name.
	pub camera: Option<String>,
	pub resolver: ResolverConfig,
	pub store: StoreConfig,
	pub log: LogConfig,
}

/// Store lookup retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
	/// Automatic retries after a transient lookup failure.
	pub retries: u32,
	pub retry_backoff_ms: u64,
	/// Per-lookup bound in milliseconds; `0` disables it.
	pub lookup_timeout_ms: u64,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			retries: 1,
			retry_backoff_ms: 200,
			lookup_timeout_ms: 10_000,
		}
	}
}

impl ResolverConfig {
	pub fn retry_backoff(&self) -> Duration {
		Duration::from_millis(self.retry_backoff_ms)
	}

	pub fn lookup_timeout(&self) -> Option<Duration> {
		(self.lookup_timeout_ms > 0).then_some(Duration::from_millis(self.lookup_timeout_ms))
	}
}

/// Simulated backend conditions for the in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
	/// Delay added to every store call.
	pub latency_ms: u64,
	/// Number of initial store calls that fail as unavailable.
	pub fail_first: usize,
}

impl StoreConfig {
	pub fn latency(&self) -> Duration {
		Duration::from_millis(self.latency_ms)
	}
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Trace,
	Debug,
	#[default]
	Info,
	Warn,
	Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
	pub level: LogLevel,
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Load configuration from a file.
	///
	/// A relative `seed` path is resolved against the file's directory.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		let mut config = Self::parse(&content)?;
		if let (Some(seed), Some(dir)) = (config.seed.as_mut(), path.parent())
			&& seed.is_relative()
		{
			*seed = dir.join(&*seed);
		}
		Ok(config)
	}

	/// Default configuration file location, if the platform has one.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("repairdesk").join("config.toml"))
	}

	/// Loads the default configuration file, or defaults when it does not exist.
	pub fn load_default() -> Result<Self> {
		match Self::default_path() {
			Some(path) if path.is_file() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}
}
