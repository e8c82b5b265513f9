use axum::{
	http::{HeaderName, HeaderValue, StatusCode},
	response::{IntoResponse, Json, Response},
};
use dfm_types::{QuoteId, QuoteResponse};

/// Correlation header carried by every quote response
pub const QUOTE_ID_HEADER: HeaderName = HeaderName::from_static("x-quote-id");

/// Serialize a quote body with its status and correlation header
pub fn quote_response(status: u16, quote_id: &QuoteId, body: QuoteResponse) -> Response {
	let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
	let mut response = (status, Json(body)).into_response();
	if let Ok(value) = HeaderValue::from_str(quote_id.as_str()) {
		response.headers_mut().insert(QUOTE_ID_HEADER, value);
	}
	response
}
