use std::fmt::Write;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::api::types::CompanyCategory;
use crate::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let data_dir = match app_dirs::get_data_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("suspend-desk {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "data directory: {data_dir}");

	Box::leak(details.into_boxed_str())
}

pub fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
	Installation,
	Sales,
}

impl From<CategoryArg> for CompanyCategory {
	fn from(value: CategoryArg) -> Self {
		match value {
			CategoryArg::Installation => Self::Installation,
			CategoryArg::Sales => Self::Sales,
		}
	}
}

/// Command-line arguments accepted by the `suspend-desk` binary.
#[derive(Parser, Debug)]
#[command(
	name = "suspend-desk",
	version,
	long_version = long_version(),
	about = "Terminal console for the sales/installation suspension registry"
)]
pub struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "SUSPEND_DESK_CONFIG",
		help = "Additional configuration file to merge (default: none)"
	)]
	pub config: Vec<PathBuf>,

	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub no_config: bool,

	#[arg(
		short = 'u',
		long,
		value_name = "URL",
		help = "Override the API base URL (default: http://127.0.0.1:8000)"
	)]
	pub base_url: Option<String>,

	#[arg(long, help = "Print the effective configuration before starting")]
	pub print_config: bool,

	#[arg(
		long,
		value_name = "FILE",
		help = "Export the company list as CSV to FILE and exit instead of starting the UI"
	)]
	pub export: Option<PathBuf>,

	#[arg(
		long,
		value_enum,
		value_name = "CATEGORY",
		help = "Company category for --export (default: installation)"
	)]
	pub category: Option<CategoryArg>,

	#[arg(
		short = 's',
		long,
		value_name = "TEXT",
		help = "Search filter for --export (default: none)"
	)]
	pub search: Option<String>,
}
