use std::sync::Arc;

use serde_json::Value;
use time::OffsetDateTime;

use cardrank_domain::Card;

/// Full catalog at one point in time, in document-id order.
pub type Snapshot = Arc<Vec<Card>>;

#[derive(Clone, Debug)]
pub struct CatalogRecord {
	pub id: String,
	pub card: Card,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl CatalogRecord {
	pub fn to_json(&self) -> Value {
		serde_json::json!({
			"id": self.id,
			"card": self.card,
			"createdAt": self.created_at.unix_timestamp(),
			"updatedAt": self.updated_at.unix_timestamp(),
		})
	}
}
