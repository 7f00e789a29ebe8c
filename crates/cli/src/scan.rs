//! Line-driven scan session.
//!
//! Each stdin line stands in for one camera capture. Outcomes are printed as
//! JSON lines as soon as the session reports them, so a slow resolve that is
//! superseded by a later line never prints.

use repairdesk_scan::{ScanOutcome, ScanSession, ScanState};
use repairdesk_store::EntityStore;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::CliError;

pub async fn run<S>(session: &mut ScanSession<S>) -> Result<(), CliError>
where
	S: EntityStore + 'static,
{
	session.focus()?;
	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else { break };
				let code = line.trim_end_matches(['\r', '\n']);
				if code.is_empty() {
					continue;
				}
				rearm(session)?;
				let generation = session.submit(code)?;
				debug!(generation, "cli.scan.submitted");
			}
			Some(outcome) = session.next_outcome() => print_outcome(&outcome)?,
		}
	}

	if let Some(outcome) = session.next_outcome().await {
		print_outcome(&outcome)?;
	}
	session.blur();
	Ok(())
}

/// Puts the session back into a state that accepts a capture.
fn rearm<S>(session: &mut ScanSession<S>) -> Result<(), CliError>
where
	S: EntityStore + 'static,
{
	match session.state() {
		ScanState::Failed(_) => session.retry()?,
		ScanState::Succeeded => {
			session.navigation_complete()?;
			session.focus()?;
		}
		ScanState::Idle => session.focus()?,
		ScanState::Scanning | ScanState::Decoding | ScanState::Resolving => {}
	}
	Ok(())
}

fn print_outcome(outcome: &ScanOutcome) -> Result<(), CliError> {
	let line = match outcome {
		ScanOutcome::Navigate(target) => json!({ "outcome": "navigate", "target": target }),
		ScanOutcome::Failed { kind, message } => json!({
			"outcome": "failed",
			"kind": kind.as_str(),
			"message": message,
		}),
	};
	println!("{}", serde_json::to_string(&line)?);
	Ok(())
}
