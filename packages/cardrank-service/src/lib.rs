pub mod ai_rank;
pub mod catalog;
pub mod search;
pub mod suggest;

mod error;

pub use error::{Error, Result};
pub use search::{SearchOutcome, SearchSession, SearchView};
pub use suggest::{SuggestRequest, SuggestResponse};

use std::sync::Arc;

use cardrank_config::Config;
use cardrank_providers::generation::TextGenerator;
use cardrank_storage::{BoxFuture, catalog::CatalogStore};

/// Sends one prompt to the ranking model and returns its raw text reply.
pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, cardrank_providers::Result<String>>;
}

impl GenerationProvider for TextGenerator {
	fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, cardrank_providers::Result<String>> {
		Box::pin(TextGenerator::generate(self, prompt))
	}
}

pub struct Providers {
	pub generator: Arc<dyn GenerationProvider>,
}
impl Providers {
	pub fn new(generator: Arc<dyn GenerationProvider>) -> Self {
		Self { generator }
	}

	/// Builds the HTTP-backed generator once so every ranking call reuses its client.
	pub fn from_config(cfg: &Config) -> Result<Self> {
		let generator = TextGenerator::new(cfg.providers.llm_ranker.clone())?;

		Ok(Self { generator: Arc::new(generator) })
	}
}

pub struct RankerService {
	pub cfg: Config,
	pub catalog: Arc<dyn CatalogStore>,
	pub providers: Providers,
}
impl RankerService {
	pub fn new(cfg: Config, catalog: Arc<dyn CatalogStore>) -> Result<Self> {
		let providers = Providers::from_config(&cfg)?;

		Ok(Self { cfg, catalog, providers })
	}

	pub fn with_providers(
		cfg: Config,
		catalog: Arc<dyn CatalogStore>,
		providers: Providers,
	) -> Self {
		Self { cfg, catalog, providers }
	}
}
