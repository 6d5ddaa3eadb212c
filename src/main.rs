use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use suspend_desk::api::ApiClient;
use suspend_desk::api::types::CompanyCategory;
use suspend_desk::{cli, export, logging, settings, ui};

fn main() -> Result<()> {
	let cli = cli::parse_cli();
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let log_path = logging::initialize(resolved.log_filter.as_deref())?;
	info!("logging to {}", log_path.display());

	let api = Arc::new(ApiClient::new(&resolved.base_url)?);

	match &cli.export {
		Some(path) => {
			let category = cli
				.category
				.map(CompanyCategory::from)
				.unwrap_or_default();
			let search = cli.search.as_deref().unwrap_or("");
			export::export_companies(&api, category, search, path)?;
			println!("exported company list to {}", path.display());
			Ok(())
		}
		None => ui::run(api),
	}
}
