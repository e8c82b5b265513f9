//! Core engine trait for analysis adapters

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use super::{AnalysisResult, EngineInvocation, EngineReport};

/// Descriptive information about an engine adapter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineInfo {
	pub engine_id: String,
	pub name: String,
	pub version: String,
	pub description: Option<String>,
}

impl EngineInfo {
	pub fn new(engine_id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			engine_id: engine_id.into(),
			name: name.into(),
			version: version.into(),
			description: None,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// An external DFM analysis engine
///
/// Implementations run one invocation as a single unit of work and return
/// the engine's report. Deadlines are enforced by the caller; dropping the
/// returned future must abandon the work.
#[async_trait]
pub trait AnalysisEngine: Send + Sync + Debug {
	/// Engine description
	fn engine_info(&self) -> &EngineInfo;

	/// Engine ID for logs
	fn id(&self) -> &str {
		&self.engine_info().engine_id
	}

	/// Run the analysis for one staged model
	async fn analyze(&self, invocation: &EngineInvocation) -> AnalysisResult<EngineReport>;

	/// Whether the engine looks usable; used by the readiness probe
	async fn health_check(&self) -> AnalysisResult<bool> {
		Ok(true)
	}
}
