//! User-facing search: rank, resolve, and publish only the newest request's result.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::RankerService;
use cardrank_domain::{Card, ResolvedSearchResult, resolution};

impl RankerService {
	/// Ranks and resolves `query` against `cards`. A blank query is a no-op.
	pub async fn search(&self, query: &str, cards: &[Card]) -> Option<ResolvedSearchResult> {
		let query = query.trim();

		if query.is_empty() {
			return None;
		}

		let ranked = self.ai_rank(query, cards).await;
		let resolved = resolution::resolve(&ranked, cards, query, &self.cfg.ranking);

		if resolved.is_empty() {
			tracing::info!(query, source = ?resolved.source, "Search resolved no cards.");
		}

		Some(resolved)
	}

	/// Searches the catalog snapshot that is current when the call starts.
	pub async fn search_catalog(&self, query: &str) -> Option<ResolvedSearchResult> {
		let snapshot = self.catalog.snapshot();

		self.search(query, &snapshot).await
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SearchView {
	Idle,
	Searching { request_id: u64, query: String },
	Resolved { request_id: u64, result: ResolvedSearchResult },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
	/// Blank query; nothing started and the view is unchanged.
	Skipped,
	/// Newest request; its result is now the view.
	Applied(ResolvedSearchResult),
	/// A newer request started while this one was in flight; the view was left alone.
	Superseded(ResolvedSearchResult),
}

struct SessionState {
	latest: u64,
	view: SearchView,
}

/// Holds the displayed search state. Each submission takes a fresh token, and only the
/// holder of the latest token may publish.
pub struct SearchSession {
	state: Mutex<SessionState>,
}
impl SearchSession {
	pub fn new() -> Self {
		Self { state: Mutex::new(SessionState { latest: 0, view: SearchView::Idle }) }
	}

	pub fn view(&self) -> SearchView {
		self.lock().view.clone()
	}

	pub fn is_loading(&self) -> bool {
		matches!(self.lock().view, SearchView::Searching { .. })
	}

	/// Takes the next token and marks the session as searching.
	pub fn begin(&self, query: &str) -> u64 {
		let mut state = self.lock();

		state.latest += 1;

		let request_id = state.latest;

		state.view = SearchView::Searching { request_id, query: query.to_string() };

		request_id
	}

	/// Publishes `result` if `request_id` is still the latest token. Returns whether it did.
	pub fn finish(&self, request_id: u64, result: ResolvedSearchResult) -> bool {
		let mut state = self.lock();

		if state.latest != request_id {
			return false;
		}

		state.view = SearchView::Resolved { request_id, result };

		true
	}

	pub async fn run(&self, service: &RankerService, query: &str, cards: &[Card]) -> SearchOutcome {
		let query = query.trim();

		if query.is_empty() {
			return SearchOutcome::Skipped;
		}

		let request_id = self.begin(query);
		let mut pending = PendingSearch { session: self, request_id, settled: false };
		let Some(result) = service.search(query, cards).await else {
			return SearchOutcome::Skipped;
		};

		pending.settle();

		if self.finish(request_id, result.clone()) {
			SearchOutcome::Applied(result)
		} else {
			tracing::debug!(request_id, query, "Discarding superseded search result.");

			SearchOutcome::Superseded(result)
		}
	}

	fn lock(&self) -> MutexGuard<'_, SessionState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
impl Default for SearchSession {
	fn default() -> Self {
		Self::new()
	}
}

/// Returns the session to idle if the owning search is dropped before it settles.
struct PendingSearch<'a> {
	session: &'a SearchSession,
	request_id: u64,
	settled: bool,
}
impl PendingSearch<'_> {
	fn settle(&mut self) {
		self.settled = true;
	}
}
impl Drop for PendingSearch<'_> {
	fn drop(&mut self) {
		if self.settled {
			return;
		}

		let mut state = self.session.lock();

		if state.latest == self.request_id && matches!(state.view, SearchView::Searching { .. }) {
			tracing::debug!(request_id = self.request_id, "Search cancelled before it finished.");

			state.view = SearchView::Idle;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn empty_result(query: &str) -> ResolvedSearchResult {
		ResolvedSearchResult {
			query: query.to_string(),
			cards: Vec::new(),
			reasons: Default::default(),
			reasoning: None,
			display_query: "Top Picks".to_string(),
			match_key: String::new(),
			source: cardrank_domain::RankingSource::Heuristic,
		}
	}

	#[test]
	fn tokens_increase_and_only_latest_publishes() {
		let session = SearchSession::new();
		let first = session.begin("amazon");
		let second = session.begin("fuel");

		assert!(second > first);
		assert!(session.is_loading());
		assert!(!session.finish(first, empty_result("amazon")));
		assert!(session.is_loading());
		assert!(session.finish(second, empty_result("fuel")));

		let SearchView::Resolved { request_id, result } = session.view() else {
			panic!("Session must be resolved.");
		};

		assert_eq!(request_id, second);
		assert_eq!(result.query, "fuel");
	}

	#[test]
	fn unsettled_search_resets_only_its_own_request() {
		let session = SearchSession::new();
		let first = session.begin("amazon");

		drop(PendingSearch { session: &session, request_id: first, settled: false });

		assert_eq!(session.view(), SearchView::Idle);

		let older = session.begin("amazon");
		let newer = session.begin("fuel");

		drop(PendingSearch { session: &session, request_id: older, settled: false });

		assert!(session.is_loading());

		drop(PendingSearch { session: &session, request_id: newer, settled: true });

		assert!(session.is_loading());
	}

	#[test]
	fn new_session_is_idle() {
		assert_eq!(SearchSession::default().view(), SearchView::Idle);
	}
}
