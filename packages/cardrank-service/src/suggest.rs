use serde::{Deserialize, Serialize};

use crate::{Error, RankerService, Result};
use cardrank_domain::Card;

/// Server-side ranking request: the caller supplies the cards to rank.
#[derive(Clone, Debug, Deserialize)]
pub struct SuggestRequest {
	pub query: String,
	#[serde(default)]
	pub cards: Vec<Card>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestResponse {
	pub ranked_card_names: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reasoning: Option<String>,
}

impl RankerService {
	pub async fn suggest(&self, req: SuggestRequest) -> Result<SuggestResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let ranked = self.ai_rank(query, &req.cards).await;

		Ok(SuggestResponse { ranked_card_names: ranked.names(), reasoning: ranked.reasoning })
	}
}
