mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Catalog, Config, DEFAULT_CATEGORIES, LlmProviderConfig, Providers, Ranking, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if !matches!(cfg.ranking.mode.as_str(), "ai" | "heuristic") {
		return Err(Error::Validation {
			message: "ranking.mode must be one of ai or heuristic.".to_string(),
		});
	}
	if cfg.ranking.max_results == 0 {
		return Err(Error::Validation {
			message: "ranking.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.ranking.fallback_label.trim().is_empty() {
		return Err(Error::Validation {
			message: "ranking.fallback_label must be non-empty.".to_string(),
		});
	}

	let llm = &cfg.providers.llm_ranker;

	if !llm.temperature.is_finite() || llm.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.llm_ranker.temperature must be a finite number, zero or greater."
				.to_string(),
		});
	}

	for (key, value) in &llm.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("providers.llm_ranker.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.ranking.uses_model() {
		for (label, value) in [
			("providers.llm_ranker.api_base", &llm.api_base),
			("providers.llm_ranker.api_key", &llm.api_key),
			("providers.llm_ranker.model", &llm.model),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("{label} must be non-empty when ranking.mode is ai."),
				});
			}
		}

		if llm.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.llm_ranker.timeout_ms must be greater than zero.".to_string(),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.catalog
		.seed_path
		.as_deref()
		.map(|path| path.as_os_str().to_string_lossy().trim().is_empty())
		.unwrap_or(false)
	{
		cfg.catalog.seed_path = None;
	}

	cfg.ranking.categories.retain(|category| !category.trim().is_empty());
	cfg.ranking.mode = cfg.ranking.mode.trim().to_ascii_lowercase();
}
