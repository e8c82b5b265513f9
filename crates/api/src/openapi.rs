use utoipa::OpenApi;

use crate::handlers::{capabilities, health, quotes};
use dfm_types::catalog::ProcessCapabilities;
use dfm_types::quotes::response::{
	FailureResponse, ManufacturingDetails, QuotedResponse, RejectedResponse,
};
use dfm_types::{
	BoundingBox, CatalogView, CostBreakdown, DfmIssue, HealthResponse, QuoteResponse,
	ReadinessResponse,
};
use dfm_types::analysis::Point3;

#[derive(OpenApi)]
#[openapi(
	paths(
		health::health,
		health::ready,
		quotes::post_quotes,
		capabilities::get_capabilities,
	),
	components(schemas(
		quotes::QuoteUploadForm,
		QuoteResponse, QuotedResponse, RejectedResponse, FailureResponse,
		ManufacturingDetails, BoundingBox, CostBreakdown, DfmIssue, Point3,
		CatalogView, ProcessCapabilities,
		HealthResponse, ReadinessResponse
	)),
	tags(
		(name = "quotes", description = "Part quoting endpoints"),
		(name = "health", description = "Health and readiness endpoints")
	)
)]
pub struct ApiDoc;
