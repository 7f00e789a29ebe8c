//! Repair desk command line.
//!
//! Encodes and decodes entity codes, resolves them against a seeded store for
//! one tenant, and runs an interactive scan session over standard input.

mod error;
mod scan;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use repairdesk_config::{Config, LogLevel};
use repairdesk_primitives::{EntityKind, TenantId, encode_named};
use repairdesk_resolver::{Resolver, RetryPolicy};
use repairdesk_scan::{CameraDevice, ScanSession};
use repairdesk_store::{EntityStore, MemoryStore, RecordFilter, Seed, UnreliableStore};
use tracing::{debug, info, warn};

use crate::error::CliError;

type Store = Arc<UnreliableStore<MemoryStore>>;

const DEFAULT_CAMERA: &str = "default";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "repairdesk")]
#[command(about = "Entity code tools for the repair desk")]
struct Args {
	/// Configuration file (defaults to the platform config directory)
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the code for an entity
	Encode { kind: String, id: String },
	/// Split a code into its kind and id
	Decode { code: String },
	/// Resolve a code to a navigation target for a tenant
	Resolve {
		#[command(flatten)]
		store: StoreArgs,
		code: String,
	},
	/// List a tenant's records of one kind as JSON lines
	List {
		#[command(flatten)]
		store: StoreArgs,
		#[arg(value_parser = parse_kind)]
		kind: EntityKind,
		/// Case-insensitive substring match on names, models and serials
		#[arg(long)]
		filter: Option<String>,
	},
	/// Read one code per line from stdin and report each outcome
	Scan {
		#[command(flatten)]
		store: StoreArgs,
	},
}

#[derive(clap::Args, Debug)]
struct StoreArgs {
	/// Tenant the caller belongs to
	#[arg(short, long)]
	tenant: Option<String>,

	/// Seed file for the in-memory store
	#[arg(long, value_name = "PATH")]
	seed: Option<PathBuf>,

	/// Delay added to every store call
	#[arg(long, value_name = "MS")]
	latency_ms: Option<u64>,

	/// Fail this many initial store calls as unavailable
	#[arg(long, value_name = "N")]
	fail_first: Option<usize>,
}

fn parse_kind(name: &str) -> Result<EntityKind, String> {
	EntityKind::from_name(name).ok_or_else(|| CliError::UnknownKind(name.to_string()).to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::load_default()?,
	};

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			max_level(config.log.level)
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	Ok(run(args.command, &config).await?)
}

async fn run(command: Command, config: &Config) -> Result<ExitCode, CliError> {
	match command {
		Command::Encode { kind, id } => {
			println!("{}", encode_named(&kind, &id)?);
			Ok(ExitCode::SUCCESS)
		}
		Command::Decode { code } => {
			let key = repairdesk_primitives::decode(&code)?;
			println!("{}", serde_json::to_string(&key)?);
			Ok(ExitCode::SUCCESS)
		}
		Command::Resolve { store, code } => {
			let tenant = tenant(&store, config)?;
			let resolver = resolver(open_store(&store, config)?, config);
			match resolver.decode_and_resolve(&code, &tenant).await {
				Ok(target) => {
					println!("{}", serde_json::to_string_pretty(&target)?);
					Ok(ExitCode::SUCCESS)
				}
				Err(err) => {
					debug!(error = %err, kind = %err.kind(), "cli.resolve.failed");
					eprintln!("{}", err.user_message());
					Ok(ExitCode::FAILURE)
				}
			}
		}
		Command::List { store, kind, filter } => {
			let tenant = tenant(&store, config)?;
			let store = open_store(&store, config)?;
			let records = store.list(kind, &tenant).await?;
			let filter = RecordFilter::new(filter.as_deref().unwrap_or_default());
			for record in filter.apply(records) {
				println!("{}", serde_json::to_string(&record)?);
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Scan { store } => {
			let tenant = tenant(&store, config)?;
			let resolver = Arc::new(resolver(open_store(&store, config)?, config));
			let camera = CameraDevice::new(config.camera.as_deref().unwrap_or(DEFAULT_CAMERA));
			let mut session = ScanSession::new(resolver, tenant, camera);
			scan::run(&mut session).await?;
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn tenant(args: &StoreArgs, config: &Config) -> Result<TenantId, CliError> {
	args.tenant
		.clone()
		.or_else(|| config.tenant.clone())
		.map(TenantId::new)
		.ok_or(CliError::MissingTenant)
}

fn open_store(args: &StoreArgs, config: &Config) -> Result<Store, CliError> {
	let memory = match args.seed.as_ref().or(config.seed.as_ref()) {
		Some(path) => {
			let store = MemoryStore::from_seed(Seed::load(path)?)?;
			info!(
				seed = %path.display(),
				repairs = store.len(EntityKind::Repair),
				parts = store.len(EntityKind::Part),
				equipment = store.len(EntityKind::Equipment),
				"cli.store.seeded"
			);
			store
		}
		None => {
			warn!("cli.store.empty: no seed file given");
			MemoryStore::new()
		}
	};

	let latency = args.latency_ms.map_or_else(|| config.store.latency(), std::time::Duration::from_millis);
	let store = UnreliableStore::new(memory).with_latency(latency);
	store.fail_next(args.fail_first.unwrap_or(config.store.fail_first));
	Ok(Arc::new(store))
}

fn resolver(store: Store, config: &Config) -> Resolver<Store> {
	Resolver::new(store).with_retry_policy(RetryPolicy {
		retries: config.resolver.retries,
		backoff: config.resolver.retry_backoff(),
		timeout: config.resolver.lookup_timeout(),
	})
}

fn max_level(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_resolve_with_store_flags() {
		let args = Args::try_parse_from([
			"repairdesk",
			"resolve",
			"--tenant",
			"acme",
			"--latency-ms",
			"50",
			"--fail-first",
			"2",
			"part:abc123",
		])
		.unwrap();
		let Command::Resolve { store, code } = args.command else {
			panic!("expected resolve");
		};
		assert_eq!(code, "part:abc123");
		assert_eq!(store.tenant.as_deref(), Some("acme"));
		assert_eq!(store.latency_ms, Some(50));
		assert_eq!(store.fail_first, Some(2));
	}

	#[test]
	fn list_rejects_unknown_kind() {
		assert!(Args::try_parse_from(["repairdesk", "list", "vehicle"]).is_err());
		let args = Args::try_parse_from(["repairdesk", "list", "equipment", "--filter", "dell"]).unwrap();
		assert!(matches!(
			args.command,
			Command::List { kind: EntityKind::Equipment, .. }
		));
	}

	#[test]
	fn tenant_flag_overrides_config() {
		let config = Config::parse("tenant = \"acme\"").unwrap();
		let mut args = StoreArgs {
			tenant: None,
			seed: None,
			latency_ms: None,
			fail_first: None,
		};
		assert_eq!(tenant(&args, &config).unwrap(), TenantId::from("acme"));

		args.tenant = Some("globex".to_string());
		assert_eq!(tenant(&args, &config).unwrap(), TenantId::from("globex"));

		args.tenant = None;
		assert!(matches!(tenant(&args, &Config::default()), Err(CliError::MissingTenant)));
	}

	#[tokio::test]
	async fn injected_failures_come_from_flags_first() {
		let config = Config::parse("[store]\nfail_first = 5").unwrap();
		let args = StoreArgs {
			tenant: None,
			seed: None,
			latency_ms: None,
			fail_first: Some(1),
		};
		let store = open_store(&args, &config).unwrap();
		let tenant = TenantId::from("acme");
		assert!(store.list(EntityKind::Part, &tenant).await.is_err());
		assert!(store.list(EntityKind::Part, &tenant).await.is_ok());
	}
}
