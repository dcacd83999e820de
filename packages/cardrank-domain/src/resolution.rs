//! Maps ranked names back to catalog cards and derives the display label for a search.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Benefit, Card, RankedResult, RankingSource, card::max_by_value};

/// Shown instead of a table when nothing resolves.
pub const EMPTY_RESULT_MESSAGE: &str = "No matching cards found. Try searching for popular categories like \"Amazon\", \"Travel\", \"Dining\", or \"Fuel\".";

/// Placeholder for a row whose card has no benefits.
pub const NO_BENEFIT_LABEL: &str = "—";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ResolvedSearchResult {
	pub query: String,
	pub cards: Vec<Card>,
	/// Keyed by every ranked name, resolved or not.
	pub reasons: HashMap<String, Option<String>>,
	pub reasoning: Option<String>,
	pub display_query: String,
	/// Lower-cased; empty when the display label is the generic fallback.
	pub match_key: String,
	pub source: RankingSource,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ResultRow {
	pub card: Card,
	pub best_benefit: Option<Benefit>,
	pub best_benefit_label: String,
	pub reason: Option<String>,
}

pub fn resolve(
	ranked: &RankedResult,
	cards: &[Card],
	raw_query: &str,
	cfg: &cardrank_config::Ranking,
) -> ResolvedSearchResult {
	// Later duplicates overwrite earlier ones.
	let by_name: HashMap<&str, &Card> =
		cards.iter().map(|card| (card.name.as_str(), card)).collect();
	let mut seen = HashSet::new();
	let mut resolved = Vec::new();

	for entry in &ranked.results {
		let Some(card) = by_name.get(entry.name.as_str()) else { continue };

		if seen.insert(entry.name.as_str()) {
			resolved.push((*card).clone());
		}
	}

	let reasons =
		ranked.results.iter().map(|entry| (entry.name.clone(), entry.reason.clone())).collect();
	let (display_query, match_key) = derive_label(raw_query, resolved.first(), cfg);

	ResolvedSearchResult {
		query: raw_query.to_string(),
		cards: resolved,
		reasons,
		reasoning: ranked.reasoning.clone(),
		display_query,
		match_key,
		source: ranked.source,
	}
}

/// Returns `(display_query, match_key)`.
pub fn derive_label(
	raw_query: &str,
	top: Option<&Card>,
	cfg: &cardrank_config::Ranking,
) -> (String, String) {
	let lowered = raw_query.to_lowercase();

	if let Some(category) =
		cfg.categories.iter().find(|category| lowered.contains(&category.to_lowercase()))
	{
		return (category.clone(), category.to_lowercase());
	}
	if let Some(benefit) = top.and_then(Card::top_benefit) {
		return (benefit.category.clone(), benefit.category.to_lowercase());
	}

	(cfg.fallback_label.clone(), String::new())
}

/// Benefit to highlight in a card's row: the best one matching `needle`, else the card's best.
pub fn best_match_benefit<'a>(card: &'a Card, needle: &str) -> Option<&'a Benefit> {
	let needle = needle.to_lowercase();

	max_by_value(card.matching_benefits(&needle)).or_else(|| card.top_benefit())
}

impl ResolvedSearchResult {
	pub fn is_empty(&self) -> bool {
		self.cards.is_empty()
	}

	pub fn empty_message(&self) -> Option<&'static str> {
		self.is_empty().then_some(EMPTY_RESULT_MESSAGE)
	}

	pub fn reason_for(&self, name: &str) -> Option<&str> {
		self.reasons.get(name).and_then(|reason| reason.as_deref())
	}

	/// Rows in rank order, each highlighted independently against `match_key`
	/// (or the raw query when no key was derived).
	pub fn rows(&self) -> Vec<ResultRow> {
		let needle = if self.match_key.is_empty() { self.query.as_str() } else { &self.match_key };

		self.cards
			.iter()
			.map(|card| {
				let best = best_match_benefit(card, needle).cloned();
				let label =
					best.as_ref().map(Benefit::label).unwrap_or_else(|| NO_BENEFIT_LABEL.to_string());

				ResultRow {
					card: card.clone(),
					best_benefit: best,
					best_benefit_label: label,
					reason: self.reason_for(&card.name).map(str::to_string),
				}
			})
			.collect()
	}
}
