//! Analysis client
//!
//! Wraps an [`AnalysisEngine`] with the per-request deadline, a cap on
//! concurrent analyses and the conversion of raw reports into outcomes.

use dfm_types::{
	AnalysisEngine, AnalysisError, AnalysisOutcome, AnalysisResult, EngineInvocation,
	EngineReport, Verdict,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AnalysisClient {
	engine: Arc<dyn AnalysisEngine>,
	timeout: Duration,
	permits: Arc<Semaphore>,
}

impl AnalysisClient {
	/// `max_concurrent` below 1 is treated as 1
	pub fn new(engine: Arc<dyn AnalysisEngine>, timeout: Duration, max_concurrent: usize) -> Self {
		Self {
			engine,
			timeout,
			permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
		}
	}

	pub fn engine_id(&self) -> &str {
		self.engine.id()
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Analyses that could start right now
	pub fn available_permits(&self) -> usize {
		self.permits.available_permits()
	}

	/// Run one analysis within the deadline
	///
	/// Time spent waiting for a free slot counts toward the deadline. When
	/// the deadline fires the engine future is dropped, which abandons the
	/// engine's work.
	pub async fn analyze(&self, invocation: &EngineInvocation) -> AnalysisResult<AnalysisOutcome> {
		let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
		let report = tokio::time::timeout(self.timeout, self.run(invocation))
			.await
			.map_err(|_| AnalysisError::Timeout { timeout_ms })??;

		let outcome = AnalysisOutcome::try_from(report)?;
		if let Verdict::Manufacturable(estimate) = &outcome.verdict {
			if let Some((total, basic)) = estimate.pricing.disagreement() {
				warn!(
					"Engine price figures disagree for quote {}: itemized total {:.2}, basic price {:.2}; using the itemized total",
					invocation.quote_id, total, basic
				);
			}
		}
		Ok(outcome)
	}

	async fn run(&self, invocation: &EngineInvocation) -> AnalysisResult<EngineReport> {
		let _permit = self
			.permits
			.acquire()
			.await
			.map_err(|_| AnalysisError::Unavailable {
				reason: "analysis pool is closed".to_string(),
			})?;
		debug!(
			"Analysis slot acquired for quote {} on engine {}",
			invocation.quote_id,
			self.engine.id()
		);
		self.engine.analyze(invocation).await
	}

	pub async fn health_check(&self) -> bool {
		match self.engine.health_check().await {
			Ok(healthy) => healthy,
			Err(e) => {
				warn!("Engine {} health check failed: {}", self.engine.id(), e);
				false
			},
		}
	}
}
