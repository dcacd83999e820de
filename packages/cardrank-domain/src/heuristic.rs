//! Network-free ranking used whenever the model ranking is unavailable.

use crate::{
	Card, RankedEntry, RankedResult, RankingSource, card::max_by_value,
	ranking::HEURISTIC_REASONING,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCard {
	pub name: String,
	pub score: f64,
}

/// Highest value among the card's benefits that match `query`, or zero.
pub fn score_card(query: &str, card: &Card) -> f64 {
	let needle = normalize_query(query);

	if needle.is_empty() {
		return 0.0;
	}

	max_by_value(card.matching_benefits(&needle)).map(|benefit| benefit.value).unwrap_or(0.0)
}

/// Every card with its score, best first. Ties keep catalog order.
pub fn score_cards(query: &str, cards: &[Card]) -> Vec<ScoredCard> {
	let mut scored: Vec<ScoredCard> = cards
		.iter()
		.map(|card| ScoredCard { name: card.name.clone(), score: score_card(query, card) })
		.collect();

	// `sort_by` is stable, which is what keeps ties in catalog order.
	scored.sort_by(|a, b| b.score.total_cmp(&a.score));

	scored
}

/// A blank query scores every card zero, so the catalog order comes back unchanged.
pub fn rank(query: &str, cards: &[Card]) -> RankedResult {
	let results = score_cards(query, cards)
		.into_iter()
		.map(|scored| RankedEntry::named(scored.name))
		.collect();

	RankedResult {
		results,
		reasoning: Some(HEURISTIC_REASONING.to_string()),
		source: RankingSource::Heuristic,
	}
}

fn normalize_query(query: &str) -> String {
	query.trim().to_lowercase()
}
