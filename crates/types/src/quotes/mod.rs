//! Quote domain: identifiers, requests, validation and the response contract

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod errors;
pub mod request;
pub mod response;

pub use errors::{QuoteError, QuoteValidationError};
pub use request::{ModelFormat, QuoteRequest, RawQuoteRequest, UploadedFile};
pub use response::{
	FailureResponse, ManufacturingDetails, QuoteResponse, QuotedResponse, RejectedResponse,
	DFM_REJECTION_MESSAGE,
};

/// Result type for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;

/// Correlation key of one quote request
///
/// Generated once when the request is admitted and used for the staging
/// directory, the analysis invocation, logs and the response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
	/// Generate a fresh identifier
	pub fn generate() -> Self {
		Self(format!("q_{}", Uuid::new_v4().simple()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// True when the id is safe to use as a single path component
	pub fn is_path_safe(&self) -> bool {
		!self.0.is_empty()
			&& self
				.0
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
	}
}

impl fmt::Display for QuoteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for QuoteId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<String> for QuoteId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl AsRef<str> for QuoteId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_generated_ids_are_unique_and_path_safe() {
		let ids: HashSet<QuoteId> = (0..256).map(|_| QuoteId::generate()).collect();
		assert_eq!(ids.len(), 256);
		assert!(ids.iter().all(QuoteId::is_path_safe));
	}

	#[test]
	fn test_traversal_ids_are_not_path_safe() {
		assert!(!QuoteId::from("../etc").is_path_safe());
		assert!(!QuoteId::from("a/b").is_path_safe());
		assert!(!QuoteId::from("").is_path_safe());
		assert!(QuoteId::from("q_abc-123").is_path_safe());
	}

	#[test]
	fn test_quote_id_serializes_as_plain_string() {
		let id = QuoteId::from("q_1");
		assert_eq!(serde_json::to_string(&id).unwrap(), "\"q_1\"");
	}
}
