//! Configuration settings structures

use crate::credential::EngineCredential;
use dfm_types::constants::limits::{
	DEFAULT_ANALYSIS_TIMEOUT_MS, DEFAULT_CURRENCY, DEFAULT_MAX_CONCURRENT_ANALYSES,
	DEFAULT_MAX_UPLOAD_BYTES, MAX_ANALYSIS_TIMEOUT_MS, MIN_ANALYSIS_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub staging: StagingSettings,
	pub analysis: AnalysisSettings,
	pub quoting: QuotingSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
	/// Upper bound for a whole quote upload, in bytes
	pub max_upload_bytes: usize,
}

/// Where uploads are staged while analysed
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StagingSettings {
	/// Staging root; `<tmp>/dfm-quote-staging` when unset
	pub root: Option<PathBuf>,
	/// Remove directories left behind by a previous process at startup
	pub purge_on_startup: bool,
}

/// Which engine adapter to run
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
	/// Run the engine as a child process per analysis
	Subprocess,
	/// Call a remote analysis service over HTTP
	Http,
	/// In-process canned responses (local development)
	Canned,
}

/// Analysis engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisSettings {
	pub engine: EngineKind,
	/// Deadline for one analysis, including time spent queued
	pub timeout_ms: u64,
	/// Analyses allowed to run at once
	pub max_concurrent: usize,
	/// Subprocess engine: program to execute
	pub program: Option<String>,
	/// Subprocess engine: leading arguments (e.g. the script path)
	pub args: Vec<String>,
	/// Subprocess engine: working directory
	pub working_dir: Option<PathBuf>,
	/// HTTP engine: base URL
	pub endpoint: Option<String>,
	/// HTTP engine: bearer token
	///
	/// Example configurations:
	/// - Environment variable: `{"type": "env", "value": "DFM_ENGINE_TOKEN"}`
	/// - Plain value: `{"type": "plain", "value": "token"}`
	pub api_key: Option<EngineCredential>,
}

/// Pricing presentation
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuotingSettings {
	/// Billing currency reported on every quote
	pub currency: String,
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
	pub rate_limiting: RateLimitSettings,
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Rate limiting configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
	pub burst_size: u32,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Settings that load but cannot run
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("server.port must not be 0")]
	InvalidPort,

	#[error("server.max_upload_bytes must be greater than 0")]
	InvalidUploadLimit,

	#[error("analysis.timeout_ms {value}ms is outside {min}-{max}ms")]
	InvalidAnalysisTimeout { value: u64, min: u64, max: u64 },

	#[error("analysis.max_concurrent must be at least 1")]
	InvalidConcurrency,

	#[error("analysis.{field} is required for the {engine} engine")]
	MissingEngineField { engine: String, field: String },

	#[error("quoting.currency must not be empty")]
	MissingCurrency,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			staging: StagingSettings::default(),
			analysis: AnalysisSettings::default(),
			quoting: QuotingSettings::default(),
			environment: EnvironmentSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
			max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
		}
	}
}

impl Default for StagingSettings {
	fn default() -> Self {
		Self {
			root: None,
			purge_on_startup: true,
		}
	}
}

impl Default for AnalysisSettings {
	fn default() -> Self {
		Self {
			engine: EngineKind::Subprocess,
			timeout_ms: DEFAULT_ANALYSIS_TIMEOUT_MS,
			max_concurrent: DEFAULT_MAX_CONCURRENT_ANALYSES,
			program: Some("python3".to_string()),
			args: vec!["dfm/analyze.py".to_string()],
			working_dir: None,
			endpoint: None,
			api_key: None,
		}
	}
}

impl Default for QuotingSettings {
	fn default() -> Self {
		Self {
			currency: DEFAULT_CURRENCY.to_string(),
		}
	}
}

impl Default for EnvironmentSettings {
	fn default() -> Self {
		Self {
			profile: EnvironmentProfile::Development,
			debug: true,
			rate_limiting: RateLimitSettings::default(),
		}
	}
}

impl Default for RateLimitSettings {
	fn default() -> Self {
		Self {
			enabled: false,
			requests_per_minute: 100,
			burst_size: 10,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl AnalysisSettings {
	pub fn timeout(&self) -> std::time::Duration {
		std::time::Duration::from_millis(self.timeout_ms)
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Absolute staging root with the temp-dir fallback applied
	pub fn staging_root(&self) -> PathBuf {
		let root = self
			.staging
			.root
			.clone()
			.unwrap_or_else(|| std::env::temp_dir().join("dfm-quote-staging"));
		std::path::absolute(&root).unwrap_or(root)
	}

	/// Check if running in production
	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	/// Check if debug mode is enabled
	pub fn is_debug(&self) -> bool {
		self.environment.debug && !self.is_production()
	}

	/// Reject settings the service cannot start with
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.server.port == 0 {
			return Err(ConfigValidationError::InvalidPort);
		}
		if self.server.max_upload_bytes == 0 {
			return Err(ConfigValidationError::InvalidUploadLimit);
		}

		let timeout = self.analysis.timeout_ms;
		if !(MIN_ANALYSIS_TIMEOUT_MS..=MAX_ANALYSIS_TIMEOUT_MS).contains(&timeout) {
			return Err(ConfigValidationError::InvalidAnalysisTimeout {
				value: timeout,
				min: MIN_ANALYSIS_TIMEOUT_MS,
				max: MAX_ANALYSIS_TIMEOUT_MS,
			});
		}
		if self.analysis.max_concurrent == 0 {
			return Err(ConfigValidationError::InvalidConcurrency);
		}

		match self.analysis.engine {
			EngineKind::Subprocess if is_blank(self.analysis.program.as_deref()) => {
				return Err(ConfigValidationError::MissingEngineField {
					engine: "subprocess".to_string(),
					field: "program".to_string(),
				});
			},
			EngineKind::Http if is_blank(self.analysis.endpoint.as_deref()) => {
				return Err(ConfigValidationError::MissingEngineField {
					engine: "http".to_string(),
					field: "endpoint".to_string(),
				});
			},
			_ => {},
		}

		if self.quoting.currency.trim().is_empty() {
			return Err(ConfigValidationError::MissingCurrency);
		}

		Ok(())
	}
}

fn is_blank(value: Option<&str>) -> bool {
	value.map(str::trim).unwrap_or_default().is_empty()
}
