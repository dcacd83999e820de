use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_CATEGORIES: [&str; 17] = [
	"Flipkart",
	"Amazon",
	"Swiggy",
	"Zomato",
	"Uber",
	"Ola",
	"BookMyShow",
	"BigBasket",
	"Travel",
	"Fuel",
	"Groceries",
	"Shopping",
	"Online Shopping",
	"Dining",
	"Entertainment",
	"Utilities",
	"General",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub catalog: Catalog,
	pub providers: Providers,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
	/// Optional. JSON array of cards loaded into the catalog at startup.
	pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub llm_ranker: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// "ai" asks the remote model first; "heuristic" never leaves the process.
	pub mode: String,
	pub max_results: u32,
	/// Display label used when neither the query nor the top card yields a category.
	pub fallback_label: String,
	/// Ordered; the first category found in a query wins the display label.
	pub categories: Vec<String>,
}
impl Ranking {
	pub fn uses_model(&self) -> bool {
		self.mode == "ai"
	}
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			mode: "ai".to_string(),
			max_results: 5,
			fallback_label: "Top Picks".to_string(),
			categories: DEFAULT_CATEGORIES.iter().map(|category| category.to_string()).collect(),
		}
	}
}
