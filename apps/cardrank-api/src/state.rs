use std::sync::Arc;

use cardrank_config::Config;
use cardrank_service::{RankerService, SearchSession};
use cardrank_storage::{catalog, memory::MemoryCatalog};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RankerService>,
	pub session: Arc<SearchSession>,
}
impl AppState {
	/// Builds an in-memory catalog, seeded from `catalog.seed_path` when set.
	pub fn new(config: Config) -> color_eyre::Result<Self> {
		let store = MemoryCatalog::new();

		if let Some(path) = &config.catalog.seed_path {
			let cards = catalog::load_seed_file(path)?;

			store.seed(cards)?;
		}

		let service = RankerService::new(config, Arc::new(store))?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: RankerService) -> Self {
		Self { service: Arc::new(service), session: Arc::new(SearchSession::new()) }
	}
}
