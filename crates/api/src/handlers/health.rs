use axum::{extract::State, http::StatusCode, response::Json};
use dfm_types::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Liveness probe
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/health",
	responses((status = 200, description = "Service healthy", body = HealthResponse)),
	tag = "health"
))]
pub async fn health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "healthy".to_string(),
		version: env!("CARGO_PKG_VERSION").to_string(),
	})
}

/// GET /ready - Readiness probe with staging and engine checks
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/ready",
	responses(
		(status = 200, description = "Ready to accept quote requests", body = ReadinessResponse),
		(status = 503, description = "A dependency is unavailable", body = ReadinessResponse)
	),
	tag = "health"
))]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let readiness = state.quote_service.readiness().await;
	let code = if readiness.staging_healthy && readiness.engine_healthy {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};
	(code, Json(readiness))
}
