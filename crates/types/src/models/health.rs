use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Liveness response
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
	pub status: String,
	pub version: String,
}

/// Readiness response with dependency checks
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
	pub status: String,
	pub staging_healthy: bool,
	pub engine_healthy: bool,
	pub engine: String,
}
