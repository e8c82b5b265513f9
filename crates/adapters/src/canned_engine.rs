//! In-process engine with preset answers
//!
//! Used for local development (`analysis.engine = "canned"`) and by tests
//! that need to control the engine's verdict, failure or latency.

use async_trait::async_trait;
use dfm_types::{
	AnalysisEngine, AnalysisError, AnalysisResult, BoundingBox, EngineInfo, EngineInvocation,
	EngineReport,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum CannedAnswer {
	Report(EngineReport),
	Error(AnalysisError),
}

#[derive(Debug)]
pub struct CannedEngine {
	info: EngineInfo,
	answer: CannedAnswer,
	delay: Option<Duration>,
	healthy: bool,
	calls: AtomicUsize,
	last_invocation: Mutex<Option<EngineInvocation>>,
}

impl CannedEngine {
	fn with_answer(answer: CannedAnswer) -> Self {
		Self {
			info: EngineInfo::new("canned", "Canned DFM Engine", env!("CARGO_PKG_VERSION"))
				.with_description("Returns a preset analysis report"),
			answer,
			delay: None,
			healthy: true,
			calls: AtomicUsize::new(0),
			last_invocation: Mutex::new(None),
		}
	}

	/// Always answer with `report`
	pub fn with_report(report: EngineReport) -> Self {
		Self::with_answer(CannedAnswer::Report(report))
	}

	/// Always fail with `error`
	pub fn with_error(error: AnalysisError) -> Self {
		Self::with_answer(CannedAnswer::Error(error))
	}

	/// A manufacturable part with a fixed price, for local runs
	pub fn demo() -> Self {
		Self::with_report(EngineReport {
			manufacturable: true,
			basic_price: Some(125.0),
			lead_time_days: Some(7),
			bounding_box: Some(BoundingBox::new(100.0, 60.0, 25.0)),
			..Default::default()
		})
	}

	/// Wait this long before answering
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Report unhealthy on readiness probes
	pub fn unhealthy(mut self) -> Self {
		self.healthy = false;
		self
	}

	/// Number of `analyze` calls started so far
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// The most recent invocation received
	pub fn last_invocation(&self) -> Option<EngineInvocation> {
		self.last_invocation
			.lock()
			.map(|guard| guard.clone())
			.unwrap_or_default()
	}
}

#[async_trait]
impl AnalysisEngine for CannedEngine {
	fn engine_info(&self) -> &EngineInfo {
		&self.info
	}

	async fn analyze(&self, invocation: &EngineInvocation) -> AnalysisResult<EngineReport> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Ok(mut last) = self.last_invocation.lock() {
			*last = Some(invocation.clone());
		}

		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}

		match &self.answer {
			CannedAnswer::Report(report) => Ok(report.clone()),
			CannedAnswer::Error(error) => Err(error.clone()),
		}
	}

	async fn health_check(&self) -> AnalysisResult<bool> {
		Ok(self.healthy)
	}
}
