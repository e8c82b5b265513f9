//! Error types for quote operations

use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::catalog::Process;
use crate::staging::StagingError;

/// Validation errors for quote requests
///
/// Every message lists the accepted values so the caller can correct the
/// request without another round trip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteValidationError {
	#[error("Invalid process {}. Valid processes: {allowed}", describe(.value))]
	InvalidProcess { value: String, allowed: String },

	#[error("Invalid material {} for process {process}. Valid materials: {allowed}", describe(.value))]
	InvalidMaterial {
		process: Process,
		value: String,
		allowed: String,
	},

	#[error("Invalid finish {} for process {process}. Valid finishes: {allowed}", describe(.value))]
	InvalidFinish {
		process: Process,
		value: String,
		allowed: String,
	},

	#[error("A 3D model file is required. Supported formats: {allowed}")]
	MissingModelFile { allowed: String },

	#[error("Unsupported model file '{filename}'. Supported formats: {allowed}")]
	UnsupportedModelFormat { filename: String, allowed: String },

	#[error("Unsupported drawing file '{filename}'. Supported formats: {allowed}")]
	UnsupportedDrawingFormat { filename: String, allowed: String },
}

impl QuoteValidationError {
	/// Stable machine-readable code
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidProcess { .. } => "INVALID_PROCESS",
			Self::InvalidMaterial { .. } => "INVALID_MATERIAL",
			Self::InvalidFinish { .. } => "INVALID_FINISH",
			Self::MissingModelFile { .. } => "MISSING_MODEL_FILE",
			Self::UnsupportedModelFormat { .. } => "UNSUPPORTED_MODEL_FORMAT",
			Self::UnsupportedDrawingFormat { .. } => "UNSUPPORTED_DRAWING_FORMAT",
		}
	}
}

fn describe(value: &str) -> String {
	if value.is_empty() {
		"(missing)".to_string()
	} else {
		format!("'{}'", value)
	}
}

/// Request-level failures of the quote pipeline
///
/// A DFM rejection is not an error: it is a successful analysis with a
/// negative verdict and is reported through `QuoteResponse::Rejected`.
#[derive(Error, Debug)]
pub enum QuoteError {
	#[error("Quote validation failed: {0}")]
	Validation(#[from] QuoteValidationError),

	#[error("Malformed upload: {reason}")]
	MalformedUpload { reason: String },

	#[error("Staging failed: {0}")]
	Staging(#[from] StagingError),

	#[error("Analysis failed: {0}")]
	Analysis(#[from] AnalysisError),
}

impl QuoteError {
	/// HTTP status class of the failure
	pub fn status_code(&self) -> u16 {
		if self.is_client_error() {
			400
		} else {
			500
		}
	}

	/// Caller-fixable failures; nothing was staged or analysed
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::Validation(_) | Self::MalformedUpload { .. })
	}

	/// Stable code for logs and metrics
	pub fn code(&self) -> &'static str {
		match self {
			Self::Validation(e) => e.code(),
			Self::MalformedUpload { .. } => "MALFORMED_UPLOAD",
			Self::Staging(_) => "STAGING_FAILURE",
			Self::Analysis(e) if e.is_timeout() => "ANALYSIS_TIMEOUT",
			Self::Analysis(_) => "ANALYSIS_ENGINE_ERROR",
		}
	}

	/// Message safe to return to the caller
	///
	/// Infrastructure failures never expose paths, engine output or stack traces.
	pub fn public_message(&self) -> String {
		match self {
			Self::Validation(e) => e.to_string(),
			Self::MalformedUpload { reason } => format!("Malformed upload: {}", reason),
			Self::Staging(_) => {
				"Failed to store the uploaded files. Please try again later.".to_string()
			},
			Self::Analysis(e) if e.is_timeout() => {
				"Manufacturability analysis timed out. Please try again later.".to_string()
			},
			Self::Analysis(_) => {
				"Manufacturability analysis failed. Please try again later.".to_string()
			},
		}
	}
}
