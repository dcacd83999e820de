//! Model-backed ranking with a heuristic fallback.
//!
//! The model sees a compact projection of each card and must answer with a JSON object:
//! `{"results": [{"name": "...", "reason": "..."}], "reasoning": "..."}`. The older
//! `{"rankedCardNames": [...]}` shape is still accepted. Anything else falls back to
//! [`heuristic::rank`], so callers always get a ranking.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, RankerService, Result};
use cardrank_domain::{
	BenefitType, Card, CardType, FeesAndCharges, RankedEntry, RankedResult, RankingSource,
	heuristic,
};

const RANKING_SYSTEM_PROMPT: &str = "You are a credit card rewards expert. \
Rank the given credit cards by how well they reward the user's query. \
Only use card names exactly as they appear in the card list. \
Return STRICT JSON with keys: results (array of up to {max} objects with keys name and optional reason) \
and reasoning (short string). Do not wrap the JSON in prose or code fences.";

const NAME_KEYS: [&str; 3] = ["name", "card", "title"];
const REASON_KEYS: [&str; 3] = ["reason", "why", "explanation"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactCard<'a> {
	pub name: &'a str,
	pub bank_name: &'a str,
	pub card_type: CardType,
	pub fees_and_charges: &'a FeesAndCharges,
	pub benefits: Vec<CompactBenefit<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CompactBenefit<'a> {
	pub category: &'a str,
	#[serde(rename = "type")]
	pub kind: BenefitType,
	pub value: f64,
	pub description: &'a str,
}

impl RankerService {
	/// Ranks `cards` for `query`. Never fails: model errors degrade to the heuristic.
	pub async fn ai_rank(&self, query: &str, cards: &[Card]) -> RankedResult {
		if !self.cfg.ranking.uses_model() {
			return heuristic::rank(query, cards);
		}

		match self.model_rank(query, cards).await {
			Ok(ranked) => {
				tracing::info!(
					query,
					result_count = ranked.results.len(),
					"Model ranking succeeded."
				);

				ranked
			},
			Err(err) => {
				tracing::warn!(
					error = %err,
					query,
					"Model ranking failed; falling back to heuristic ranking."
				);

				heuristic::rank(query, cards)
			},
		}
	}

	async fn model_rank(&self, query: &str, cards: &[Card]) -> Result<RankedResult> {
		let max_results = self.cfg.ranking.max_results as usize;
		let prompt = build_ranking_prompt(query, cards, max_results)?;
		let text = self.providers.generator.generate(&prompt).await?;

		parse_ranking_text(&text, max_results)
	}
}

pub fn compact_cards(cards: &[Card]) -> Vec<CompactCard<'_>> {
	cards
		.iter()
		.map(|card| CompactCard {
			name: &card.name,
			bank_name: &card.bank_name,
			card_type: card.card_type,
			fees_and_charges: &card.fees_and_charges,
			benefits: card
				.benefits
				.iter()
				.map(|benefit| CompactBenefit {
					category: &benefit.category,
					kind: benefit.r#type,
					value: benefit.value,
					description: benefit.description.as_deref().unwrap_or(""),
				})
				.collect(),
		})
		.collect()
}

pub fn build_ranking_prompt(query: &str, cards: &[Card], max_results: usize) -> Result<String> {
	let payload = serde_json::to_string(&compact_cards(cards))?;
	let instructions = RANKING_SYSTEM_PROMPT.replace("{max}", &max_results.to_string());

	Ok(format!("{instructions}\n\nQuery: {query}\nCards: {payload}"))
}

/// Validates the model's reply and keeps at most `max_results` entries.
pub fn parse_ranking_text(text: &str, max_results: usize) -> Result<RankedResult> {
	let object = extract_json_object(text)?;
	let reasoning = object.get("reasoning").and_then(Value::as_str).map(str::to_string);
	let mut results = match (object.get("results"), object.get("rankedCardNames")) {
		(Some(Value::Array(items)), _) => items.iter().filter_map(normalize_entry).collect::<Vec<_>>(),
		(_, Some(Value::Array(names))) => names
			.iter()
			.filter_map(Value::as_str)
			.filter(|name| !name.is_empty())
			.map(RankedEntry::named)
			.collect(),
		_ =>
			return Err(Error::Parse {
				message: "Reply has neither a results nor a rankedCardNames array.".to_string(),
			}),
	};

	results.truncate(max_results);

	Ok(RankedResult { results, reasoning, source: RankingSource::Model })
}

/// Parses the first balanced `{...}` span in `text`.
///
/// Braces inside string literals are ignored, so prose or code fences around the
/// object do not matter. Only the first span is tried.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>> {
	let Some(start) = text.find('{') else {
		return Err(Error::Parse { message: "Reply contains no JSON object.".to_string() });
	};
	let Some(len) = balanced_object_len(&text[start..]) else {
		return Err(Error::Parse { message: "Reply has an unterminated JSON object.".to_string() });
	};

	match serde_json::from_str::<Value>(&text[start..start + len])? {
		Value::Object(object) => Ok(object),
		_ => Err(Error::Parse { message: "Reply span is not a JSON object.".to_string() }),
	}
}

fn balanced_object_len(text: &str) -> Option<usize> {
	let mut depth = 0_usize;
	let mut in_string = false;
	let mut escaped = false;

	for (idx, ch) in text.char_indices() {
		if in_string {
			if escaped {
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if ch == '"' {
				in_string = false;
			}

			continue;
		}

		match ch {
			'"' => in_string = true,
			'{' => depth += 1,
			'}' => {
				depth = depth.saturating_sub(1);

				if depth == 0 {
					return Some(idx + 1);
				}
			},
			_ => {},
		}
	}

	None
}

fn normalize_entry(item: &Value) -> Option<RankedEntry> {
	if let Value::String(name) = item {
		return (!name.is_empty()).then(|| RankedEntry::named(name.as_str()));
	}

	let item = item.as_object()?;
	let name = first_present(item, &NAME_KEYS).and_then(scalar_text)?;

	if name.is_empty() {
		return None;
	}

	let reason = first_present(item, &REASON_KEYS).and_then(scalar_text);

	Some(RankedEntry { name, reason })
}

fn first_present<'a>(item: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
	keys.iter().filter_map(|key| item.get(*key)).find(|value| !value.is_null())
}

fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}
