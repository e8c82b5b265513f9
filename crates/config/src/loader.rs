//! Configuration loading utilities

use crate::{ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Default configuration file (any format the `config` crate knows)
pub const DEFAULT_CONFIG_FILE: &str = "config/config";

/// Environment variable prefix, e.g. `DFM_ANALYSIS__TIMEOUT_MS`
pub const ENV_PREFIX: &str = "DFM";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("failed to read configuration: {0}")]
	Source(#[from] ConfigError),

	#[error("invalid configuration: {0}")]
	Invalid(#[from] ConfigValidationError),
}

/// Load configuration from the default file and the environment
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	load_config_from(DEFAULT_CONFIG_FILE)
}

/// Load configuration from `path` (optional) overlaid with `DFM_*` variables
///
/// Missing keys fall back to `Settings::default()`. The result is validated
/// before being returned.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("_")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{EngineCredential, EngineKind};
	use tempfile::TempDir;

	#[test]
	fn test_missing_file_uses_defaults() {
		let settings = load_config_from("does/not/exist/dfm").unwrap();
		assert_eq!(settings.server.port, 3000);
		assert_eq!(settings.analysis.engine, EngineKind::Subprocess);
	}

	fn write_settings(dir: &TempDir, json: &str) -> String {
		let file = dir.path().join("settings.json");
		std::fs::write(&file, json).unwrap();
		file.to_str().unwrap().to_string()
	}

	#[test]
	fn test_file_overrides_defaults() {
		let dir = TempDir::new().unwrap();
		let file = write_settings(
			&dir,
			r#"{"server": {"port": 8080}, "analysis": {"engine": "canned", "max_concurrent": 2}}"#,
		);

		let settings = load_config_from(&file).unwrap();
		assert_eq!(settings.server.port, 8080);
		assert_eq!(settings.analysis.engine, EngineKind::Canned);
		assert_eq!(settings.analysis.max_concurrent, 2);
		assert_eq!(settings.quoting.currency, "USD");
	}

	#[test]
	fn test_engine_credential_from_file() {
		let dir = TempDir::new().unwrap();
		let file = write_settings(
			&dir,
			r#"{"analysis": {"engine": "http", "endpoint": "http://dfm.internal:8000",
				"api_key": {"type": "env", "value": "DFM_ENGINE_TOKEN"}}}"#,
		);

		let settings = load_config_from(&file).unwrap();
		assert_eq!(
			settings.analysis.api_key,
			Some(EngineCredential::Env("DFM_ENGINE_TOKEN".to_string()))
		);
	}

	#[test]
	fn test_invalid_file_is_rejected() {
		let dir = TempDir::new().unwrap();
		let file = write_settings(&dir, r#"{"analysis": {"engine": "http"}}"#);

		let result = load_config_from(&file);
		assert!(matches!(result, Err(ConfigLoadError::Invalid(_))));
	}
}
