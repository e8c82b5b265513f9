use axum::{extract::State, response::Json};
use dfm_types::CatalogView;

use crate::state::AppState;

/// Supported processes with their materials and finishes, plus file formats
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/api/v1/capabilities",
	responses((status = 200, description = "Quotable parameter combinations", body = CatalogView)),
	tag = "quotes"
))]
pub async fn get_capabilities(State(state): State<AppState>) -> Json<CatalogView> {
	Json(state.quote_service.catalog())
}
