//! DFM Adapters
//!
//! Analysis engine adapters for the DFM quote service: a child-process
//! engine, a remote HTTP engine and an in-process canned engine.

pub mod canned_engine;
pub mod http_engine;
pub mod subprocess_engine;

pub use canned_engine::CannedEngine;
pub use dfm_types::{AnalysisEngine, AnalysisError, AnalysisResult};
pub use http_engine::HttpEngine;
pub use subprocess_engine::SubprocessEngine;

use dfm_config::{AnalysisSettings, EngineKind};
use std::sync::Arc;

/// Build the engine selected by `analysis.engine`
pub fn build_engine(settings: &AnalysisSettings) -> AnalysisResult<Arc<dyn AnalysisEngine>> {
	match settings.engine {
		EngineKind::Subprocess => Ok(Arc::new(SubprocessEngine::from_settings(settings)?)),
		EngineKind::Http => Ok(Arc::new(HttpEngine::from_settings(settings)?)),
		EngineKind::Canned => Ok(Arc::new(CannedEngine::demo())),
	}
}

/// Keep the tail of engine diagnostics, which is where errors end up
pub(crate) fn cap_diagnostic(raw: &[u8], limit: usize) -> String {
	let text = String::from_utf8_lossy(raw);
	let text = text.trim();
	if text.len() <= limit {
		return text.to_string();
	}

	let mut start = text.len() - limit;
	while !text.is_char_boundary(start) {
		start += 1;
	}
	format!("...{}", &text[start..])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_engine_by_kind() {
		let mut settings = AnalysisSettings {
			engine: EngineKind::Canned,
			..Default::default()
		};
		assert_eq!(build_engine(&settings).unwrap().id(), "canned");

		settings.engine = EngineKind::Subprocess;
		assert_eq!(build_engine(&settings).unwrap().id(), "subprocess");

		settings.engine = EngineKind::Http;
		assert!(matches!(
			build_engine(&settings),
			Err(AnalysisError::Unavailable { .. })
		));
		settings.endpoint = Some("http://127.0.0.1:9/engine".to_string());
		assert_eq!(build_engine(&settings).unwrap().id(), "http");
	}

	#[test]
	fn test_cap_diagnostic_keeps_tail() {
		assert_eq!(cap_diagnostic(b"  short\n", 64), "short");

		let long = format!("{}Traceback: boom", "x".repeat(100));
		let capped = cap_diagnostic(long.as_bytes(), 15);
		assert_eq!(capped, "...Traceback: boom");
	}

	#[test]
	fn test_cap_diagnostic_respects_char_boundaries() {
		let text = "ééééé";
		let capped = cap_diagnostic(text.as_bytes(), 3);
		assert_eq!(capped, "...é");
	}
}
