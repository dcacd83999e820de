use std::{fs, path::Path};

use tokio::sync::watch;

use crate::{
	BoxFuture, Error, Result,
	models::{CatalogRecord, Snapshot},
};
use cardrank_domain::Card;

/// Card catalog as seen by the rest of the system. Implementations own the records;
/// readers only ever get copies or shared snapshots.
pub trait CatalogStore
where
	Self: Send + Sync,
{
	fn get_all(&self) -> BoxFuture<'_, Result<Vec<Card>>>;

	fn list(&self) -> BoxFuture<'_, Result<Vec<CatalogRecord>>>;

	/// Latest published snapshot without waiting.
	fn snapshot(&self) -> Snapshot;

	/// Full snapshots, current one first. Dropping the receiver unsubscribes.
	fn subscribe(&self) -> watch::Receiver<Snapshot>;

	/// Stores a new record under a fresh id derived from the card name.
	fn create(&self, card: Card) -> BoxFuture<'_, Result<String>>;

	/// Upserts the record whose id is derived from the card's current name.
	fn update(&self, card: Card) -> BoxFuture<'_, Result<()>>;

	/// Replaces the record stored under `id`, even if the card was renamed.
	fn update_by_id<'a>(&'a self, id: &'a str, card: Card) -> BoxFuture<'a, Result<()>>;
}

pub fn load_seed_file(path: &Path) -> Result<Vec<Card>> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadSeed { path: path.to_path_buf(), source: err })?;

	serde_json::from_str(&raw).map_err(|err| Error::ParseSeed { path: path.to_path_buf(), source: err })
}

pub(crate) fn validate_card(card: &Card) -> Result<()> {
	if card.name.trim().is_empty() {
		return Err(Error::InvalidArgument("Card name must be non-empty.".to_string()));
	}
	if card.benefits.iter().any(|benefit| !benefit.value.is_finite() || benefit.value < 0.0) {
		return Err(Error::InvalidArgument(format!(
			"Benefit values of {} must be finite and zero or greater.",
			card.name
		)));
	}

	Ok(())
}
