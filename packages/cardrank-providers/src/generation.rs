// std
use std::time::Duration;

// crates.io
use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use cardrank_config::LlmProviderConfig;

/// One configured HTTP client, reused for every ranking call in the process.
#[derive(Clone, Debug)]
pub struct TextGenerator {
	cfg: LlmProviderConfig,
	http: Client,
}
impl TextGenerator {
	pub fn new(cfg: LlmProviderConfig) -> Result<Self> {
		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.user_agent(concat!("cardrank/", env!("CARGO_PKG_VERSION")))
			.build()?;

		Ok(Self { cfg, http })
	}

	pub fn config(&self) -> &LlmProviderConfig {
		&self.cfg
	}

	/// Single round trip: one prompt in, the model's text out. No retry.
	pub async fn generate(&self, prompt: &str) -> Result<String> {
		let url = format!("{}{}", self.cfg.api_base.trim_end_matches('/'), self.cfg.path);
		let body = build_request_body(&self.cfg, prompt);
		let res = self
			.http
			.post(url)
			.headers(crate::auth_headers(&self.cfg.api_key, &self.cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_completion_text(&json)
			.ok_or_else(|| Error::EmptyCompletion { provider_id: self.cfg.provider_id.clone() })
	}
}

fn build_request_body(cfg: &LlmProviderConfig, prompt: &str) -> Value {
	serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [{ "role": "user", "content": prompt }],
	})
}

/// Reads `choices[0].message.content`, or the joined `candidates[0].content.parts[*].text`.
fn parse_completion_text(json: &Value) -> Option<String> {
	let chat = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::to_string);
	let text = chat.or_else(|| {
		let parts = json
			.get("candidates")
			.and_then(|v| v.as_array())
			.and_then(|arr| arr.first())
			.and_then(|candidate| candidate.get("content"))
			.and_then(|content| content.get("parts"))
			.and_then(|v| v.as_array())?;
		let joined: String =
			parts.iter().filter_map(|part| part.get("text").and_then(|t| t.as_str())).collect();

		Some(joined)
	})?;

	if text.trim().is_empty() { None } else { Some(text) }
}
