//! Service startup logging for the DFM quote service

use crate::Settings;
use std::env;
use tracing::{info, warn};

/// Logs service, platform and effective configuration at startup
pub fn log_service_info(settings: &Settings) {
	let service_name = "dfm-quote";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== DFM Quote Service Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}
	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!("🌍 Profile: {:?}", settings.environment.profile);
	info!("📦 Staging Root: {}", settings.staging_root().display());
	info!(
		"🔬 Analysis Engine: {:?} (timeout {}ms, max {} concurrent)",
		settings.analysis.engine, settings.analysis.timeout_ms, settings.analysis.max_concurrent
	);
	if let Some(endpoint) = &settings.analysis.endpoint {
		info!("🔗 Engine Endpoint: {}", endpoint);
	}
	if let Some(api_key) = &settings.analysis.api_key {
		info!("🔑 Engine Credentials: {}", api_key.source());
		if api_key.is_placeholder() && settings.is_production() {
			warn!("Engine credentials use the sample placeholder value in production");
		}
	}
	info!("💱 Currency: {}", settings.quoting.currency);
	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 DFM Quote Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs additional startup completion information
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ DFM Quote Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
	info!("📡 Ready to accept quote requests");
}
