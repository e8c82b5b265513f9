//! Error types for analysis engine operations

use thiserror::Error;

/// Infrastructure failures of an analysis run
///
/// A negative manufacturability verdict is not represented here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
	#[error("Analysis timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Failed to launch analysis engine '{program}': {reason}")]
	Launch { program: String, reason: String },

	#[error("Analysis engine exited with {status}: {stderr}")]
	EngineExit { status: String, stderr: String },

	#[error("Analysis engine returned malformed output: {reason}")]
	MalformedOutput { reason: String },

	#[error("Analysis engine report is incomplete: {reason}")]
	IncompleteReport { reason: String },

	#[error("Analysis engine request failed: {reason}")]
	Transport { reason: String },

	#[error("Analysis engine returned HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("Analysis engine unavailable: {reason}")]
	Unavailable { reason: String },
}

impl AnalysisError {
	/// The deadline expired before the engine answered
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}

	/// Build a malformed-output error from a JSON parse failure
	pub fn malformed(err: &serde_json::Error) -> Self {
		Self::MalformedOutput {
			reason: err.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_only_timeout_is_timeout() {
		assert!(AnalysisError::Timeout { timeout_ms: 5 }.is_timeout());
		assert!(!AnalysisError::MalformedOutput {
			reason: "eof".to_string()
		}
		.is_timeout());
	}

	#[test]
	fn test_malformed_from_json_error() {
		let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
		let analysis = AnalysisError::malformed(&err);
		assert!(analysis.to_string().starts_with("Analysis engine returned malformed output"));
	}
}
