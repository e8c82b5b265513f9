//! DFM Configuration
//!
//! Configuration management and startup utilities for the DFM quote service.

pub mod credential;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use credential::{CredentialError, EngineCredential};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	AnalysisSettings, ConfigValidationError, EngineKind, EnvironmentProfile, EnvironmentSettings,
	LogFormat, LoggingSettings, QuotingSettings, RateLimitSettings, ServerSettings, Settings,
	StagingSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
