//! Staging area instrumented for acquisition/release accounting

use dfm_quote::async_trait::async_trait;
use dfm_quote::{FsStagingArea, QuoteId, QuoteRequest, StagedFileSet, StagingArea, StagingError};
use dfm_types::StagingResult;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Filesystem staging that counts every call and can fail on demand
#[derive(Debug)]
pub struct CountingStagingArea {
	inner: FsStagingArea,
	stage_calls: AtomicUsize,
	staged: AtomicUsize,
	releases: AtomicUsize,
	fail_stage: AtomicBool,
}

#[allow(dead_code)]
impl CountingStagingArea {
	pub fn new(root: &Path) -> Self {
		Self {
			inner: FsStagingArea::new(root),
			stage_calls: AtomicUsize::new(0),
			staged: AtomicUsize::new(0),
			releases: AtomicUsize::new(0),
			fail_stage: AtomicBool::new(false),
		}
	}

	/// Make every following `stage` fail as if the disk were full
	pub fn fail_stages(&self) {
		self.fail_stage.store(true, Ordering::SeqCst);
	}

	pub fn stage_calls(&self) -> usize {
		self.stage_calls.load(Ordering::SeqCst)
	}

	/// Successful acquisitions
	pub fn staged(&self) -> usize {
		self.staged.load(Ordering::SeqCst)
	}

	pub fn releases(&self) -> usize {
		self.releases.load(Ordering::SeqCst)
	}

	/// Request directories currently on disk
	pub fn directories_on_disk(&self) -> usize {
		std::fs::read_dir(self.inner.root())
			.map(|entries| entries.count())
			.unwrap_or(0)
	}
}

#[async_trait]
impl StagingArea for CountingStagingArea {
	async fn stage(
		&self,
		quote_id: &QuoteId,
		request: &QuoteRequest,
	) -> StagingResult<StagedFileSet> {
		self.stage_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_stage.load(Ordering::SeqCst) {
			return Err(StagingError::WriteFile {
				file: format!("{}/{}/model", self.inner.root().display(), quote_id),
				source: std::io::Error::new(std::io::ErrorKind::Other, "No space left on device"),
			});
		}

		let files = self.inner.stage(quote_id, request).await?;
		self.staged.fetch_add(1, Ordering::SeqCst);
		Ok(files)
	}

	fn release(&self, files: &StagedFileSet) -> StagingResult<()> {
		self.releases.fetch_add(1, Ordering::SeqCst);
		self.inner.release(files)
	}

	async fn health_check(&self) -> StagingResult<bool> {
		self.inner.health_check().await
	}
}
