use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::AppState;
use cardrank_domain::{Card, POPULAR_QUERIES, RankingSource, ResolvedSearchResult, ResultRow};
use cardrank_service::{Error, SearchOutcome, SearchView, SuggestRequest, SuggestResponse};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/cards", get(list_cards).post(create_card).put(upsert_card))
		.route("/v1/cards/{id}", put(update_card))
		.route("/v1/search", post(search))
		.route("/v1/search/latest", get(search_latest))
		.route("/v1/suggest", post(suggest))
		.route("/v1/popular_queries", get(popular_queries))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
	pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
	pub query: String,
	pub display_query: String,
	pub match_key: String,
	pub reasoning: Option<String>,
	pub source: RankingSource,
	pub rows: Vec<ResultRow>,
	pub empty_message: Option<&'static str>,
	/// A newer search started before this one finished; the session kept the newer one.
	pub superseded: bool,
}
impl SearchResponse {
	fn new(result: &ResolvedSearchResult, superseded: bool) -> Self {
		Self {
			query: result.query.clone(),
			display_query: result.display_query.clone(),
			match_key: result.match_key.clone(),
			reasoning: result.reasoning.clone(),
			source: result.source,
			rows: result.rows(),
			empty_message: result.empty_message(),
			superseded,
		}
	}
}

#[derive(Debug, Serialize)]
struct CreatedBody {
	id: String,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_cards(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
	let records = state.service.list_cards().await?;

	Ok(Json(records))
}

async fn create_card(
	State(state): State<AppState>,
	Json(card): Json<Card>,
) -> Result<(StatusCode, Json<CreatedBody>), ApiError> {
	let id = state.service.create_card(card).await?;

	Ok((StatusCode::CREATED, Json(CreatedBody { id })))
}

async fn upsert_card(
	State(state): State<AppState>,
	Json(card): Json<Card>,
) -> Result<StatusCode, ApiError> {
	state.service.upsert_card(card).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn update_card(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(card): Json<Card>,
) -> Result<StatusCode, ApiError> {
	state.service.update_card(&id, card).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn search(State(state): State<AppState>, Json(payload): Json<SearchRequest>) -> Response {
	let snapshot = state.service.catalog.snapshot();

	match state.session.run(&state.service, &payload.query, &snapshot).await {
		SearchOutcome::Skipped => StatusCode::NO_CONTENT.into_response(),
		SearchOutcome::Applied(result) => Json(SearchResponse::new(&result, false)).into_response(),
		SearchOutcome::Superseded(result) => Json(SearchResponse::new(&result, true)).into_response(),
	}
}

async fn search_latest(State(state): State<AppState>) -> Json<SearchView> {
	Json(state.session.view())
}

async fn suggest(
	State(state): State<AppState>,
	Json(payload): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
	let response = state.service.suggest(payload).await?;

	Ok(Json(response))
}

async fn popular_queries() -> Json<Vec<&'static str>> {
	Json(POPULAR_QUERIES.to_vec())
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			Error::NotFound { message } => json_error(StatusCode::NOT_FOUND, "not_found", message, None),
			Error::Provider { message } | Error::Parse { message } =>
				json_error(StatusCode::BAD_GATEWAY, "provider_error", message, None),
			Error::Storage { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message, None),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
