use std::{env, fs, path::PathBuf};

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Map, Value};
use tower::util::ServiceExt;

use cardrank_api::{routes, state::AppState};
use cardrank_config::{Catalog, Config, LlmProviderConfig, Providers, Ranking, Service};

const SEED: &str = r#"[
	{
		"name": "Amazon Pay ICICI Credit Card",
		"bankName": "ICICI Bank",
		"cardType": "cobrand",
		"benefits": [
			{ "category": "Amazon", "type": "cashback", "value": 5 },
			{ "category": "General", "type": "cashback", "value": 1 }
		]
	},
	{
		"name": "Swiggy HDFC Bank Credit Card",
		"bankName": "HDFC Bank",
		"cardType": "cobrand",
		"benefits": [{ "category": "Swiggy", "type": "cashback", "value": 10 }]
	},
	{
		"name": "Indian Oil Axis Bank Credit Card",
		"bankName": "Axis Bank",
		"cardType": "cobrand",
		"benefits": [{ "category": "Fuel", "type": "reward_points", "value": 4 }]
	}
]"#;

fn write_seed(name: &str) -> PathBuf {
	let path = env::temp_dir().join(format!("cardrank_api_{name}_{}.json", std::process::id()));

	fs::write(&path, SEED).expect("Failed to write seed file.");

	path
}

fn test_config(seed_path: Option<PathBuf>) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		catalog: Catalog { seed_path },
		providers: Providers {
			llm_ranker: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: String::new(),
				path: "/v1/chat/completions".to_string(),
				model: "test".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		ranking: Ranking { mode: "heuristic".to_string(), ..Ranking::default() },
	}
}

fn seeded_app(name: &str) -> Router {
	let path = write_seed(name);
	let state = AppState::new(test_config(Some(path.clone()))).expect("State must build.");

	fs::remove_file(path).ok();

	routes::router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header("content-type", "application/json")
		.body(Body::from(body.to_string()))
		.expect("Failed to build request.")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.clone().oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Body must be JSON.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let app = routes::router(AppState::new(test_config(None)).expect("State must build."));
	let (status, _) =
		send(&app, Request::builder().uri("/health").body(Body::empty()).expect("Request.")).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn seeded_cards_are_listed_in_id_order() {
	let app = seeded_app("list");
	let (status, body) =
		send(&app, Request::builder().uri("/v1/cards").body(Body::empty()).expect("Request.")).await;
	let ids: Vec<&str> =
		body.as_array().expect("Array body.").iter().filter_map(|item| item["id"].as_str()).collect();

	assert_eq!(status, StatusCode::OK);
	assert_eq!(ids, vec![
		"amazon-pay-icici-credit-card",
		"indian-oil-axis-bank-credit-card",
		"swiggy-hdfc-bank-credit-card",
	]);
}

#[tokio::test]
async fn create_assigns_suffixed_ids_on_collision() {
	let app = seeded_app("create");
	let card = serde_json::json!({ "name": "Amazon Pay ICICI Credit Card" });
	let (status, body) = send(&app, json_request("POST", "/v1/cards", card)).await;

	assert_eq!(status, StatusCode::CREATED);
	assert_eq!(body["id"], "amazon-pay-icici-credit-card-2");
}

#[tokio::test]
async fn catalog_errors_use_json_error_bodies() {
	let app = seeded_app("errors");
	let (missing_status, missing) = send(
		&app,
		json_request("PUT", "/v1/cards/no-such-card", serde_json::json!({ "name": "Ghost" })),
	)
	.await;
	let (blank_status, blank) =
		send(&app, json_request("POST", "/v1/cards", serde_json::json!({ "name": "  " }))).await;

	assert_eq!(missing_status, StatusCode::NOT_FOUND);
	assert_eq!(missing["error_code"], "not_found");
	assert_eq!(blank_status, StatusCode::BAD_REQUEST);
	assert_eq!(blank["error_code"], "invalid_request");
}

#[tokio::test]
async fn update_by_id_keeps_a_single_record_after_rename() {
	let app = seeded_app("rename");
	let renamed = serde_json::json!({ "name": "Swiggy HDFC Bank Card", "bankName": "HDFC Bank" });
	let (status, _) =
		send(&app, json_request("PUT", "/v1/cards/swiggy-hdfc-bank-credit-card", renamed)).await;
	let (_, body) =
		send(&app, Request::builder().uri("/v1/cards").body(Body::empty()).expect("Request.")).await;
	let records = body.as_array().expect("Array body.");

	assert_eq!(status, StatusCode::NO_CONTENT);
	assert_eq!(records.len(), 3);
	assert!(records.iter().any(|item| item["card"]["name"] == "Swiggy HDFC Bank Card"));
}

#[tokio::test]
async fn search_returns_highlighted_rows() {
	let app = seeded_app("search");
	let (status, body) = send(
		&app,
		json_request("POST", "/v1/search", serde_json::json!({ "query": "best card for Amazon" })),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["display_query"], "Amazon");
	assert_eq!(body["source"], "heuristic");
	assert_eq!(body["superseded"], false);
	assert!(body["empty_message"].is_null());
	assert_eq!(body["rows"][0]["card"]["name"], "Amazon Pay ICICI Credit Card");
	assert_eq!(body["rows"][0]["best_benefit_label"], "Amazon: 5%");
	// Indian Oil sorts before Swiggy on the zero-score tie (id order).
	assert_eq!(body["rows"][1]["best_benefit_label"], "Fuel: 4% RP");

	let (latest_status, latest) =
		send(&app, Request::builder().uri("/v1/search/latest").body(Body::empty()).expect("Request."))
			.await;

	assert_eq!(latest_status, StatusCode::OK);
	assert_eq!(latest["phase"], "resolved");
	assert_eq!(latest["result"]["query"], "best card for Amazon");
}

#[tokio::test]
async fn blank_search_is_no_content() {
	let app = seeded_app("blank");
	let (status, _) =
		send(&app, json_request("POST", "/v1/search", serde_json::json!({ "query": "   " }))).await;
	let (_, latest) =
		send(&app, Request::builder().uri("/v1/search/latest").body(Body::empty()).expect("Request."))
			.await;

	assert_eq!(status, StatusCode::NO_CONTENT);
	assert_eq!(latest["phase"], "idle");
}

#[tokio::test]
async fn empty_catalog_search_carries_empty_message() {
	let app = routes::router(AppState::new(test_config(None)).expect("State must build."));
	let (status, body) =
		send(&app, json_request("POST", "/v1/search", serde_json::json!({ "query": "fuel" }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["rows"].as_array().map(Vec::len), Some(0));
	assert!(body["empty_message"].as_str().is_some_and(|message| message.contains("No matching cards")));
}

#[tokio::test]
async fn suggest_returns_ranked_names() {
	let app = routes::router(AppState::new(test_config(None)).expect("State must build."));
	let cards: Value = serde_json::from_str(SEED).expect("Seed must parse.");
	let (status, body) = send(
		&app,
		json_request("POST", "/v1/suggest", serde_json::json!({ "query": "fuel", "cards": cards })),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["rankedCardNames"][0], "Indian Oil Axis Bank Credit Card");
	assert_eq!(body["rankedCardNames"].as_array().map(Vec::len), Some(3));
	assert_eq!(body["reasoning"], "Heuristic ranking fallback used.");

	let (blank_status, _) = send(
		&app,
		json_request("POST", "/v1/suggest", serde_json::json!({ "query": "", "cards": [] })),
	)
	.await;

	assert_eq!(blank_status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn popular_queries_are_listed() {
	let app = routes::router(AppState::new(test_config(None)).expect("State must build."));
	let (status, body) = send(
		&app,
		Request::builder().uri("/v1/popular_queries").body(Body::empty()).expect("Request."),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!(["Amazon", "Flipkart", "Swiggy", "Travel", "Fuel", "Dining"]));
}
