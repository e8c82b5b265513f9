//! Quote service
//!
//! Runs one quote request through validation, staging, analysis and
//! assembly. Staged files are released on every path out of a request,
//! including cancellation.

use async_trait::async_trait;
use dfm_staging::StagedFiles;
use dfm_types::{
	CatalogView, EngineInvocation, ParameterMatrix, QuoteError, QuoteId, QuoteResponse,
	QuoteResult, RawQuoteRequest, ReadinessResponse, StagingArea,
};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};

use crate::analysis::AnalysisClient;
use crate::assembler::QuoteAssembler;

/// Trait for quote operations, the seam the HTTP layer depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
	/// Produce a quote or DFM rejection for one upload
	///
	/// `Ok` carries a quoted or rejected response; `Err` is a request-level
	/// failure (validation or infrastructure).
	async fn submit_quote(
		&self,
		quote_id: &QuoteId,
		request: RawQuoteRequest,
	) -> QuoteResult<QuoteResponse>;

	/// Supported processes, materials, finishes and file formats
	fn catalog(&self) -> CatalogView;

	/// Dependency checks for the readiness probe
	async fn readiness(&self) -> ReadinessResponse;
}

#[derive(Debug, Clone)]
pub struct QuoteService {
	matrix: Arc<ParameterMatrix>,
	staging: Arc<dyn StagingArea>,
	analysis: AnalysisClient,
	assembler: QuoteAssembler,
}

impl QuoteService {
	pub fn new(
		matrix: Arc<ParameterMatrix>,
		staging: Arc<dyn StagingArea>,
		analysis: AnalysisClient,
		assembler: QuoteAssembler,
	) -> Self {
		Self {
			matrix,
			staging,
			analysis,
			assembler,
		}
	}

	pub fn matrix(&self) -> &ParameterMatrix {
		&self.matrix
	}

	async fn process(
		&self,
		quote_id: &QuoteId,
		raw: RawQuoteRequest,
	) -> QuoteResult<QuoteResponse> {
		let request = raw.validate(&self.matrix)?;

		let staged = StagedFiles::stage(self.staging.clone(), quote_id, &request).await?;
		let invocation =
			EngineInvocation::translate(quote_id.clone(), staged.model_path().to_path_buf(), &request);

		let analysis = self.analysis.analyze(&invocation).await;
		if let Err(e) = staged.release() {
			warn!("Failed to release staged files: {}", e);
		}

		let outcome = analysis?;
		Ok(self.assembler.assemble(quote_id.clone(), &request, outcome))
	}
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
	async fn submit_quote(
		&self,
		quote_id: &QuoteId,
		request: RawQuoteRequest,
	) -> QuoteResult<QuoteResponse> {
		let span = info_span!("quote", quote_id = %quote_id);
		async move {
			let result = self.process(quote_id, request).await;
			match &result {
				Ok(QuoteResponse::Quoted(quote)) => info!(
					"Quoted {} {} (lead time {} days)",
					quote.price, quote.currency, quote.lead_time_in_days
				),
				Ok(QuoteResponse::Rejected(rejection)) => info!(
					"Part rejected with {} DFM issues",
					rejection.dfm_issues.len()
				),
				Ok(QuoteResponse::Failed(failure)) => warn!("Quote failed: {}", failure.error),
				Err(e) if e.is_client_error() => info!("Quote request rejected [{}]: {}", e.code(), e),
				Err(e) => error!("Quote request failed [{}]: {}", e.code(), e),
			}
			result
		}
		.instrument(span)
		.await
	}

	fn catalog(&self) -> CatalogView {
		self.matrix.catalog()
	}

	async fn readiness(&self) -> ReadinessResponse {
		let staging_healthy = match self.staging.health_check().await {
			Ok(healthy) => healthy,
			Err(e) => {
				warn!("Staging health check failed: {}", e);
				false
			},
		};
		let engine_healthy = self.analysis.health_check().await;

		ReadinessResponse {
			status: if staging_healthy && engine_healthy {
				"ready".to_string()
			} else {
				"not_ready".to_string()
			},
			staging_healthy,
			engine_healthy,
			engine: self.analysis.engine_id().to_string(),
		}
	}
}

/// Convenience for callers that only hold the error
pub fn failure_response(error: &QuoteError) -> QuoteResponse {
	QuoteResponse::failure(error.public_message())
}
