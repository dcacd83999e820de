use serde_json::Value;

use crate::{RankerService, Result};
use cardrank_domain::Card;

impl RankerService {
	pub async fn list_cards(&self) -> Result<Vec<Value>> {
		let records = self.catalog.list().await?;

		Ok(records.iter().map(|record| record.to_json()).collect())
	}

	pub async fn create_card(&self, card: Card) -> Result<String> {
		Ok(self.catalog.create(card).await?)
	}

	pub async fn upsert_card(&self, card: Card) -> Result<()> {
		Ok(self.catalog.update(card).await?)
	}

	pub async fn update_card(&self, id: &str, card: Card) -> Result<()> {
		Ok(self.catalog.update_by_id(id, card).await?)
	}
}
