//! Release-once guard over a staged file set

use dfm_types::{QuoteId, QuoteRequest, StagedFileSet, StagingArea, StagingResult};
use std::ops::Deref;
use std::sync::Arc;
use tracing::warn;

/// Owns a request's staged files until the request terminates
///
/// Release happens exactly once: either through [`StagedFiles::release`] or,
/// if the owning future is dropped mid-flight, from `Drop`.
#[derive(Debug)]
pub struct StagedFiles {
	files: StagedFileSet,
	area: Arc<dyn StagingArea>,
	released: bool,
}

impl StagedFiles {
	/// Stage the request and wrap the result in a guard
	pub async fn stage(
		area: Arc<dyn StagingArea>,
		quote_id: &QuoteId,
		request: &QuoteRequest,
	) -> StagingResult<Self> {
		let files = area.stage(quote_id, request).await?;
		Ok(Self::new(area, files))
	}

	pub fn new(area: Arc<dyn StagingArea>, files: StagedFileSet) -> Self {
		Self {
			files,
			area,
			released: false,
		}
	}

	/// Remove the staged files now and report the outcome
	pub fn release(mut self) -> StagingResult<()> {
		self.released = true;
		self.area.release(&self.files)
	}
}

impl Deref for StagedFiles {
	type Target = StagedFileSet;

	fn deref(&self) -> &Self::Target {
		&self.files
	}
}

impl Drop for StagedFiles {
	fn drop(&mut self) {
		if self.released {
			return;
		}
		self.released = true;
		if let Err(e) = self.area.release(&self.files) {
			warn!(
				"Failed to release staging for quote {}: {}",
				self.files.quote_id(),
				e
			);
		}
	}
}
