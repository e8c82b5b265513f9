//! Quote upload endpoint

use axum::{
	extract::{
		multipart::{Multipart, MultipartError, MultipartRejection},
		State,
	},
	http::StatusCode,
	response::Response,
};
use dfm_service::failure_response;
use dfm_types::{QuoteError, QuoteId, QuoteResponse, RawQuoteRequest, UploadedFile};
use tracing::{info, info_span, Instrument};

use crate::handlers::common::quote_response;
use crate::state::AppState;

/// Multipart body of a quote request
#[cfg(feature = "openapi")]
#[derive(serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct QuoteUploadForm {
	/// Manufacturing process tag, e.g. `CNC`
	process: String,
	/// Material tag allowed for the process
	material: String,
	/// Finish tag allowed for the process
	finish: String,
	/// 3D model (`.stl`, `.step`, `.stp`)
	#[schema(value_type = String, format = Binary)]
	model_file: Vec<u8>,
	/// Optional technical drawing (`.pdf`)
	#[schema(value_type = Option<String>, format = Binary)]
	drawing_file: Option<Vec<u8>>,
}

/// POST /api/v1/quotes - Quote a part from an uploaded model
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/quotes",
	request_body(content = QuoteUploadForm, content_type = "multipart/form-data"),
	responses(
		(status = 200, description = "Part quoted", body = QuoteResponse,
			headers(("x-quote-id" = String, description = "Quote identifier"))),
		(status = 400, description = "Invalid request or DFM rejection", body = QuoteResponse),
		(status = 413, description = "Upload too large", body = QuoteResponse),
		(status = 500, description = "Staging or analysis failure", body = QuoteResponse)
	),
	tag = "quotes"
))]
pub async fn post_quotes(
	State(state): State<AppState>,
	multipart: Result<Multipart, MultipartRejection>,
) -> Response {
	let quote_id = QuoteId::generate();

	let raw = match multipart {
		Ok(multipart) => {
			read_quote_form(multipart)
				.instrument(info_span!("quote", quote_id = %quote_id))
				.await
		},
		Err(rejection) => Err(UploadFailure::Malformed(rejection.body_text())),
	};

	let raw = match raw {
		Ok(raw) => raw,
		Err(UploadFailure::TooLarge) => {
			info!(%quote_id, "Upload exceeds {} bytes", state.max_upload_bytes);
			let body = QuoteResponse::failure(format!(
				"Upload exceeds the maximum size of {} bytes",
				state.max_upload_bytes
			));
			return quote_response(StatusCode::PAYLOAD_TOO_LARGE.as_u16(), &quote_id, body);
		},
		Err(UploadFailure::Malformed(reason)) => {
			let error = QuoteError::MalformedUpload { reason };
			info!(%quote_id, "Rejected malformed upload: {}", error);
			return quote_response(error.status_code(), &quote_id, failure_response(&error));
		},
	};

	match state.quote_service.submit_quote(&quote_id, raw).await {
		Ok(response) => quote_response(response.status_code(), &quote_id, response),
		Err(error) => quote_response(error.status_code(), &quote_id, failure_response(&error)),
	}
}

enum UploadFailure {
	TooLarge,
	Malformed(String),
}

impl From<MultipartError> for UploadFailure {
	fn from(err: MultipartError) -> Self {
		if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
			Self::TooLarge
		} else {
			Self::Malformed(err.body_text())
		}
	}
}

/// Collect the known form fields; the first occurrence of a field wins
async fn read_quote_form(mut multipart: Multipart) -> Result<RawQuoteRequest, UploadFailure> {
	let mut raw = RawQuoteRequest::default();

	while let Some(field) = multipart.next_field().await? {
		let name = field.name().unwrap_or_default().to_string();
		match name.as_str() {
			"process" | "material" | "finish" => {
				let value = field.text().await?;
				let slot = match name.as_str() {
					"process" => &mut raw.process,
					"material" => &mut raw.material,
					_ => &mut raw.finish,
				};
				slot.get_or_insert(value);
			},
			"modelFile" | "model" | "file" => {
				let filename = field.file_name().unwrap_or_default().to_string();
				let content = field.bytes().await?;
				raw.model_file
					.get_or_insert_with(|| UploadedFile::new(filename, content));
			},
			"drawingFile" | "drawing" => {
				let filename = field.file_name().unwrap_or_default().to_string();
				let content = field.bytes().await?;
				raw.drawing_file
					.get_or_insert_with(|| UploadedFile::new(filename, content));
			},
			_ => {},
		}
	}

	Ok(raw)
}
