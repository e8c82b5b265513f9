//! DFM Quote Library
//!
//! Instant manufacturing quotes for uploaded 3D models: validates the
//! requested process, material and finish, stages the upload, runs a DFM
//! analysis engine and returns either a priced quote or the reasons the
//! part cannot be made.

// Core domain types - the most commonly used types
pub use dfm_types::{
	serde_json, AnalysisEngine, AnalysisError, AnalysisOutcome, CatalogView, EngineInvocation,
	EngineReport, Finish, Material, ParameterMatrix, Process, QuoteError, QuoteId, QuoteRequest,
	QuoteResponse, QuoteValidationError, RawQuoteRequest, StagedFileSet, StagingArea,
	StagingError, UploadedFile,
};

// Service layer
pub use dfm_service::{AnalysisClient, QuoteAssembler, QuoteService, QuoteServiceTrait};

// Staging and engines
pub use dfm_adapters::{build_engine, CannedEngine, HttpEngine, SubprocessEngine};
pub use dfm_staging::{FsStagingArea, StagedFiles};

// API layer
pub use dfm_api::{create_router, AppState, QUOTE_ID_HEADER};

// Config
pub use dfm_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod models {
	pub use dfm_types::*;
}

pub mod config {
	pub use dfm_config::*;
}

pub mod api {
	pub use dfm_api::*;
}

pub mod service {
	pub use dfm_service::*;
}

// Re-export external dependencies for tests and embedders
pub use async_trait;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Builder for the quote server
///
/// Every collaborator defaults from [`Settings`]; tests and embedders can
/// substitute the engine, the staging area or the parameter matrix.
#[derive(Default)]
pub struct QuoteServerBuilder {
	settings: Option<Settings>,
	engine: Option<Arc<dyn AnalysisEngine>>,
	staging: Option<Arc<dyn StagingArea>>,
	matrix: Option<ParameterMatrix>,
}

impl QuoteServerBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use this engine instead of the one selected by `analysis.engine`
	pub fn with_engine(mut self, engine: Arc<dyn AnalysisEngine>) -> Self {
		self.engine = Some(engine);
		self
	}

	/// Use this staging area instead of a filesystem one under `staging.root`
	pub fn with_staging(mut self, staging: Arc<dyn StagingArea>) -> Self {
		self.staging = Some(staging);
		self
	}

	/// Quote against a custom parameter matrix
	pub fn with_matrix(mut self, matrix: ParameterMatrix) -> Self {
		self.matrix = Some(matrix);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Initialize tracing with configuration-based settings
	///
	/// A subscriber that is already installed is left in place.
	fn init_tracing_from_settings(settings: &Settings) {
		use dfm_config::LogFormat;

		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
		let structured = settings.logging.structured;

		let installed = match settings.logging.format {
			LogFormat::Json => tracing_subscriber::fmt()
				.json()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
			LogFormat::Pretty => tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
			LogFormat::Compact => tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
		};

		if installed.is_ok() {
			info!(
				"Logging configuration applied: level={}, format={:?}, structured={}",
				settings.logging.level, settings.logging.format, settings.logging.structured
			);
		}
	}

	/// Wire the service and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let staging: Arc<dyn StagingArea> = match self.staging {
			Some(staging) => staging,
			None => {
				let area = FsStagingArea::new(settings.staging_root());
				area.prepare().await?;
				if settings.staging.purge_on_startup {
					area.purge_orphans().await?;
				}
				Arc::new(area)
			},
		};

		let engine = match self.engine {
			Some(engine) => engine,
			None => build_engine(&settings.analysis)?,
		};
		info!(
			"Analysis engine '{}' ready (timeout {}ms, max {} concurrent)",
			engine.id(),
			settings.analysis.timeout_ms,
			settings.analysis.max_concurrent
		);

		let analysis = AnalysisClient::new(
			engine,
			settings.analysis.timeout(),
			settings.analysis.max_concurrent,
		);
		let quote_service = QuoteService::new(
			Arc::new(self.matrix.unwrap_or_default()),
			staging,
			analysis,
			QuoteAssembler::new(settings.quoting.currency.clone()),
		);

		let app_state = AppState {
			quote_service: Arc::new(quote_service) as Arc<dyn QuoteServiceTrait>,
			max_upload_bytes: settings.server.max_upload_bytes,
		};
		let router = create_router(settings.server.max_upload_bytes).with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Start the complete server
	///
	/// Loads `.env` and configuration (unless settings were provided),
	/// initializes tracing, wires the service and serves until Ctrl+C.
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		Self::init_tracing_from_settings(&settings);
		log_service_info(&settings);
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file, environment or defaults"
			}
		);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		let rate_cfg = settings.environment.rate_limiting.clone();
		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  GET  /api/v1/capabilities");
		info!("  POST /api/v1/quotes");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		// Global rate limiting is applied at the make_service level
		if rate_cfg.enabled {
			use std::time::Duration;
			use tower::limit::RateLimitLayer;
			use tower::ServiceBuilder;
			let make_svc = ServiceBuilder::new()
				.layer(RateLimitLayer::new(
					rate_cfg.requests_per_minute as u64,
					Duration::from_secs(60),
				))
				.service(app.into_make_service());
			axum::serve(listener, make_svc)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		} else {
			axum::serve(listener, app)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		}

		dfm_config::log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
