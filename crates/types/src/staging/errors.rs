//! Error types for staging operations

use std::io;
use thiserror::Error;

/// Failures writing or removing staged files
#[derive(Debug, Error)]
pub enum StagingError {
	#[error("Quote id '{quote_id}' cannot be used as a staging directory name")]
	InvalidQuoteId { quote_id: String },

	#[error("Staging directory for quote '{quote_id}' already exists")]
	Collision { quote_id: String },

	#[error("Failed to create staging directory {path}: {source}")]
	CreateDirectory {
		path: String,
		#[source]
		source: io::Error,
	},

	#[error("Failed to write staged file {file}: {source}")]
	WriteFile {
		file: String,
		#[source]
		source: io::Error,
	},

	#[error("Failed to remove staging directory {path}: {source}")]
	Remove {
		path: String,
		#[source]
		source: io::Error,
	},
}
