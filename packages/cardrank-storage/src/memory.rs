use std::{
	collections::{BTreeMap, btree_map::Entry},
	sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use time::OffsetDateTime;
use tokio::sync::watch;

use crate::{
	BoxFuture, Error, Result,
	catalog::{CatalogStore, validate_card},
	models::{CatalogRecord, Snapshot},
};
use cardrank_domain::{
	Card,
	slug::{slugify, unique_slug},
};

/// In-process catalog keyed by slug id. Every write publishes a fresh snapshot.
pub struct MemoryCatalog {
	records: Mutex<BTreeMap<String, CatalogRecord>>,
	snapshots: watch::Sender<Snapshot>,
}
impl MemoryCatalog {
	pub fn new() -> Self {
		let (snapshots, _) = watch::channel(Arc::new(Vec::new()));

		Self { records: Mutex::new(BTreeMap::new()), snapshots }
	}

	/// Inserts a batch under fresh ids and publishes once. Returns the ids in input order.
	pub fn seed(&self, cards: Vec<Card>) -> Result<Vec<String>> {
		for card in &cards {
			validate_card(card)?;
		}

		let now = OffsetDateTime::now_utc();
		let mut records = self.lock();
		let mut ids = Vec::with_capacity(cards.len());

		for card in cards {
			ids.push(insert_new(&mut records, card, now));
		}

		self.publish(&records);

		tracing::info!(count = ids.len(), "Catalog seeded.");

		Ok(ids)
	}

	fn lock(&self) -> MutexGuard<'_, BTreeMap<String, CatalogRecord>> {
		self.records.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn publish(&self, records: &BTreeMap<String, CatalogRecord>) {
		let snapshot: Vec<Card> = records.values().map(|record| record.card.clone()).collect();

		self.snapshots.send_replace(Arc::new(snapshot));
	}

	fn create_now(&self, card: Card) -> Result<String> {
		validate_card(&card)?;

		let mut records = self.lock();
		let id = insert_new(&mut records, card, OffsetDateTime::now_utc());

		self.publish(&records);

		tracing::info!(card_id = %id, "Catalog card created.");

		Ok(id)
	}

	fn update_now(&self, card: Card) -> Result<()> {
		validate_card(&card)?;

		let id = slugify(&card.name);
		let mut records = self.lock();
		let now = OffsetDateTime::now_utc();

		match records.entry(id.clone()) {
			Entry::Occupied(mut entry) => {
				let record = entry.get_mut();

				record.card = card;
				record.updated_at = now;
			},
			Entry::Vacant(entry) => {
				// A rename lands here: the old record stays and a second one appears.
				tracing::warn!(
					card_id = %id,
					card_name = %card.name,
					"Update target missing; storing as a new record."
				);
				entry.insert(CatalogRecord { id, card, created_at: now, updated_at: now });
			},
		}

		self.publish(&records);

		Ok(())
	}

	fn update_by_id_now(&self, id: &str, card: Card) -> Result<()> {
		validate_card(&card)?;

		let mut records = self.lock();
		let Some(record) = records.get_mut(id) else {
			return Err(Error::NotFound(format!("Card {id} does not exist.")));
		};

		record.card = card;
		record.updated_at = OffsetDateTime::now_utc();

		self.publish(&records);

		Ok(())
	}
}
impl Default for MemoryCatalog {
	fn default() -> Self {
		Self::new()
	}
}
impl CatalogStore for MemoryCatalog {
	fn get_all(&self) -> BoxFuture<'_, Result<Vec<Card>>> {
		let cards = self.lock().values().map(|record| record.card.clone()).collect();

		Box::pin(async move { Ok(cards) })
	}

	fn list(&self) -> BoxFuture<'_, Result<Vec<CatalogRecord>>> {
		let records = self.lock().values().cloned().collect();

		Box::pin(async move { Ok(records) })
	}

	fn snapshot(&self) -> Snapshot {
		self.snapshots.borrow().clone()
	}

	fn subscribe(&self) -> watch::Receiver<Snapshot> {
		self.snapshots.subscribe()
	}

	fn create(&self, card: Card) -> BoxFuture<'_, Result<String>> {
		let result = self.create_now(card);

		Box::pin(async move { result })
	}

	fn update(&self, card: Card) -> BoxFuture<'_, Result<()>> {
		let result = self.update_now(card);

		Box::pin(async move { result })
	}

	fn update_by_id<'a>(&'a self, id: &'a str, card: Card) -> BoxFuture<'a, Result<()>> {
		let result = self.update_by_id_now(id, card);

		Box::pin(async move { result })
	}
}

fn insert_new(
	records: &mut BTreeMap<String, CatalogRecord>,
	card: Card,
	now: OffsetDateTime,
) -> String {
	let id = unique_slug(&slugify(&card.name), |candidate| records.contains_key(candidate));

	records.insert(id.clone(), CatalogRecord { id: id.clone(), card, created_at: now, updated_at: now });

	id
}
