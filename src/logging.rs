//! File-backed tracing setup.
//!
//! The UI owns the terminal while it runs, so log lines go to a file
//! under the data directory instead of stderr. `RUST_LOG` (or the
//! configured filter) selects verbosity.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "suspend-desk.log";
const DEFAULT_FILTER: &str = "suspend_desk=info";

/// Install the global subscriber. Returns the log file path so the
/// binary can mention it on exit.
pub fn initialize(filter: Option<&str>) -> Result<PathBuf> {
	let dir = crate::app_dirs::get_data_dir()?;
	fs::create_dir_all(&dir)
		.with_context(|| format!("failed to create the data directory {}", dir.display()))?;
	let path = dir.join(LOG_FILE);
	let file = File::create(&path)
		.with_context(|| format!("failed to open the log file {}", path.display()))?;

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.try_init();

	Ok(path)
}
