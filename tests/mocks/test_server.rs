//! Test server for integration tests
//!
//! Spawns the real router on an ephemeral port with an injected engine and
//! an instrumented staging area under a temporary root.

use axum::Router;
use dfm_quote::{AnalysisEngine, CannedEngine, QuoteServerBuilder, Settings};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use super::staging::CountingStagingArea;

/// Test server instance with configurable settings
pub struct TestServer {
	#[allow(dead_code)]
	pub base_url: String,
	#[allow(dead_code)]
	pub staging: Arc<CountingStagingArea>,
	pub handle: JoinHandle<()>,
	_staging_root: TempDir,
}

#[allow(dead_code)]
impl TestServer {
	/// Spawn a test server with the demo engine
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_engine(Arc::new(CannedEngine::demo())).await
	}

	/// Spawn a test server backed by `engine`
	pub async fn spawn_with_engine(
		engine: Arc<dyn AnalysisEngine>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_settings(engine, test_settings()).await
	}

	pub async fn spawn_with_settings(
		engine: Arc<dyn AnalysisEngine>,
		settings: Settings,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let staging_root = TempDir::new()?;
		let staging = Arc::new(CountingStagingArea::new(staging_root.path()));

		let (app, _state) = QuoteServerBuilder::new()
			.with_settings(settings)
			.with_engine(engine)
			.with_staging(staging.clone())
			.start()
			.await?;

		let (base_url, handle) = Self::spawn_server_with_app(app).await?;
		Ok(Self {
			base_url,
			staging,
			handle,
			_staging_root: staging_root,
		})
	}

	async fn spawn_server_with_app(
		app: Router,
	) -> Result<(String, JoinHandle<()>), Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}", addr);

		let handle = tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});

		// Give the server a moment to start
		tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

		Ok((base_url, handle))
	}

	pub fn quotes_url(&self) -> String {
		format!("{}/api/v1/quotes", self.base_url)
	}

	pub fn abort(&self) {
		self.handle.abort();
	}
}

/// Defaults with a short analysis deadline
pub fn test_settings() -> Settings {
	let mut settings = Settings::default();
	settings.analysis.timeout_ms = 1_000;
	settings.server.max_upload_bytes = 1024 * 1024;
	settings
}
