//! Staging contract for uploaded artifacts

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::quotes::{QuoteId, QuoteRequest};

pub mod errors;
pub use errors::StagingError;

pub type StagingResult<T> = Result<T, StagingError>;

/// Files written for one in-flight request
///
/// Owned by exactly one request; the directory is removed when the request
/// terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFileSet {
	quote_id: QuoteId,
	directory: PathBuf,
	model_path: PathBuf,
	drawing_path: Option<PathBuf>,
}

impl StagedFileSet {
	pub fn new(
		quote_id: QuoteId,
		directory: PathBuf,
		model_path: PathBuf,
		drawing_path: Option<PathBuf>,
	) -> Self {
		Self {
			quote_id,
			directory,
			model_path,
			drawing_path,
		}
	}

	pub fn quote_id(&self) -> &QuoteId {
		&self.quote_id
	}

	/// Per-request directory holding every staged file
	pub fn directory(&self) -> &Path {
		&self.directory
	}

	pub fn model_path(&self) -> &Path {
		&self.model_path
	}

	pub fn drawing_path(&self) -> Option<&Path> {
		self.drawing_path.as_deref()
	}
}

/// Per-request isolated storage for uploaded files
#[async_trait]
pub trait StagingArea: Send + Sync + Debug {
	/// Create the request's directory and write the model and optional drawing
	///
	/// On failure nothing is left behind and no release is owed.
	async fn stage(&self, quote_id: &QuoteId, request: &QuoteRequest)
		-> StagingResult<StagedFileSet>;

	/// Remove everything staged for the request
	///
	/// Synchronous so it can run from `Drop` when a request is cancelled.
	fn release(&self, files: &StagedFileSet) -> StagingResult<()>;

	/// Whether new requests can be staged
	async fn health_check(&self) -> StagingResult<bool> {
		Ok(true)
	}
}
