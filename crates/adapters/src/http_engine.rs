//! Engine adapter for a remote analysis service
//!
//! POSTs the invocation as JSON to `<endpoint>/analyze` and expects the same
//! report document the subprocess analyzer prints.

use async_trait::async_trait;
use dfm_config::AnalysisSettings;
use dfm_types::constants::limits::MAX_ENGINE_DIAGNOSTIC_BYTES;
use dfm_types::{
	AnalysisEngine, AnalysisError, AnalysisResult, EngineInfo, EngineInvocation, EngineReport,
	SecretString,
};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::cap_diagnostic;

#[derive(Debug)]
pub struct HttpEngine {
	info: EngineInfo,
	client: Client,
	analyze_url: String,
	health_url: String,
	token: Option<SecretString>,
}

impl HttpEngine {
	/// `timeout` bounds a single HTTP exchange
	pub fn new(endpoint: &str, token: Option<SecretString>, timeout: Duration) -> AnalysisResult<Self> {
		let client = Client::builder()
			.timeout(timeout)
			.user_agent(concat!("dfm-quote/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(|e| AnalysisError::Unavailable {
				reason: format!("failed to build HTTP client: {}", e),
			})?;

		Ok(Self {
			info: EngineInfo::new("http", "HTTP DFM Engine", env!("CARGO_PKG_VERSION"))
				.with_description(format!("Remote DFM analysis at {}", endpoint)),
			client,
			analyze_url: build_url(endpoint, "analyze")?,
			health_url: build_url(endpoint, "health")?,
			token,
		})
	}

	pub fn from_settings(settings: &AnalysisSettings) -> AnalysisResult<Self> {
		let endpoint = settings
			.endpoint
			.as_deref()
			.map(str::trim)
			.filter(|e| !e.is_empty())
			.ok_or_else(|| AnalysisError::Unavailable {
				reason: "analysis.endpoint is not configured".to_string(),
			})?;

		let token = settings
			.api_key
			.as_ref()
			.map(|key| key.resolve())
			.transpose()
			.map_err(|e| AnalysisError::Unavailable {
				reason: e.to_string(),
			})?;

		Self::new(endpoint, token, settings.timeout())
	}

	fn post(&self, url: &str) -> reqwest::RequestBuilder {
		let request = self.client.post(url);
		match &self.token {
			Some(token) => request.header(AUTHORIZATION, token.bearer_header()),
			None => request,
		}
	}
}

/// Join `path` onto `base`, treating the base as a directory
fn build_url(base_url: &str, path: &str) -> AnalysisResult<String> {
	let mut base = Url::parse(base_url).map_err(|e| AnalysisError::Unavailable {
		reason: format!("invalid engine endpoint '{}': {}", base_url, e),
	})?;
	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}

	let joined = base
		.join(path.trim_start_matches('/'))
		.map_err(|e| AnalysisError::Unavailable {
			reason: format!("failed to join '{}' onto '{}': {}", path, base_url, e),
		})?;
	Ok(joined.to_string())
}

#[async_trait]
impl AnalysisEngine for HttpEngine {
	fn engine_info(&self) -> &EngineInfo {
		&self.info
	}

	async fn analyze(&self, invocation: &EngineInvocation) -> AnalysisResult<EngineReport> {
		debug!(
			"Requesting analysis for quote {} from {}",
			invocation.quote_id, self.analyze_url
		);

		let response = self
			.post(&self.analyze_url)
			.json(invocation)
			.send()
			.await
			.map_err(|e| AnalysisError::Transport {
				reason: e.to_string(),
			})?;

		let status = response.status();
		let body = response.bytes().await.map_err(|e| AnalysisError::Transport {
			reason: e.to_string(),
		})?;

		if !status.is_success() {
			warn!(
				"Analysis endpoint returned status {} for quote {}",
				status, invocation.quote_id
			);
			return Err(AnalysisError::HttpStatus {
				status_code: status.as_u16(),
				reason: cap_diagnostic(&body, MAX_ENGINE_DIAGNOSTIC_BYTES),
			});
		}

		EngineReport::from_json(&String::from_utf8_lossy(&body))
	}

	async fn health_check(&self) -> AnalysisResult<bool> {
		match self.client.get(&self.health_url).send().await {
			Ok(response) if response.status().is_success() => Ok(true),
			Ok(response) => {
				warn!(
					"Analysis engine health check returned status {}",
					response.status()
				);
				Ok(false)
			},
			Err(e) => {
				warn!("Analysis engine health check failed: {}", e);
				Ok(false)
			},
		}
	}
}
