//! Layered configuration: default config files, explicit `--config`
//! files, an environment source, then CLI overrides.

use std::path::PathBuf;

use anyhow::{Result, anyhow, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::app_dirs;
use crate::cli::CliArgs;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	api: ApiSection,
	logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiSection {
	base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
	filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub base_url: String,
	pub log_filter: Option<String>,
}

impl ResolvedConfig {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  API base URL: {}", self.base_url);
		println!(
			"  Log filter: {}",
			self.log_filter.as_deref().unwrap_or("(use the default)")
		);
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;

	if let Some(base_url) = &cli.base_url {
		raw.api.base_url = Some(base_url.clone());
	}

	let base_url = raw
		.api
		.base_url
		.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
	ensure!(
		base_url.starts_with("http://") || base_url.starts_with("https://"),
		"API base URL must start with http:// or https://"
	);

	Ok(ResolvedConfig {
		base_url,
		log_filter: raw.logging.filter,
	})
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("suspend_desk")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();
	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}
	files
}
