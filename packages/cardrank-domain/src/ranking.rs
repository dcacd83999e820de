use serde::{Deserialize, Serialize};

/// Overall reasoning attached to every heuristic ranking.
pub const HEURISTIC_REASONING: &str = "Heuristic ranking fallback used.";

/// Which ranker produced a result.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingSource {
	Model,
	Heuristic,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RankedEntry {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
}
impl RankedEntry {
	pub fn named(name: impl Into<String>) -> Self {
		Self { name: name.into(), reason: None }
	}
}

/// Ranked card names, best first. Built fresh for each search and never stored.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RankedResult {
	pub results: Vec<RankedEntry>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reasoning: Option<String>,
	pub source: RankingSource,
}
impl RankedResult {
	pub fn names(&self) -> Vec<String> {
		self.results.iter().map(|entry| entry.name.clone()).collect()
	}
}
