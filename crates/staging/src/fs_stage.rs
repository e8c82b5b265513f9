//! Filesystem-backed staging area

use async_trait::async_trait;
use dfm_types::{QuoteId, QuoteRequest, StagedFileSet, StagingArea, StagingError, StagingResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const MODEL_STEM: &str = "model";
const DRAWING_FILE: &str = "drawing.pdf";

/// Stages each request under `<root>/<quote id>/`
#[derive(Debug, Clone)]
pub struct FsStagingArea {
	root: PathBuf,
}

impl FsStagingArea {
	/// A relative root is resolved against the current directory, so every
	/// staged path handed to an engine is absolute.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		let root = root.into();
		let root = std::path::absolute(&root).unwrap_or(root);
		Self { root }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Create the staging root if needed
	pub async fn prepare(&self) -> StagingResult<()> {
		tokio::fs::create_dir_all(&self.root)
			.await
			.map_err(|source| StagingError::CreateDirectory {
				path: self.root.display().to_string(),
				source,
			})
	}

	/// Remove request directories left behind by an earlier process
	///
	/// Only directories whose name is a valid quote id are touched.
	pub async fn purge_orphans(&self) -> StagingResult<usize> {
		let mut entries = match tokio::fs::read_dir(&self.root).await {
			Ok(entries) => entries,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
			Err(source) => {
				return Err(StagingError::Remove {
					path: self.root.display().to_string(),
					source,
				})
			},
		};

		let mut purged = 0;
		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|source| StagingError::Remove {
				path: self.root.display().to_string(),
				source,
			})? {
			let name = entry.file_name();
			let Some(name) = name.to_str() else {
				continue;
			};
			let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
			if !is_dir || !QuoteId::from(name).is_path_safe() {
				continue;
			}

			let path = entry.path();
			tokio::fs::remove_dir_all(&path)
				.await
				.map_err(|source| StagingError::Remove {
					path: path.display().to_string(),
					source,
				})?;
			purged += 1;
		}

		if purged > 0 {
			info!("Purged {} orphaned staging directories", purged);
		}
		Ok(purged)
	}

	fn request_dir(&self, quote_id: &QuoteId) -> StagingResult<PathBuf> {
		if !quote_id.is_path_safe() {
			return Err(StagingError::InvalidQuoteId {
				quote_id: quote_id.to_string(),
			});
		}
		Ok(self.root.join(quote_id.as_str()))
	}

	async fn write_files(
		&self,
		directory: &Path,
		request: &QuoteRequest,
	) -> StagingResult<(PathBuf, Option<PathBuf>)> {
		let model_path =
			directory.join(format!("{}.{}", MODEL_STEM, request.model_format.extension()));
		write_file(&model_path, &request.model.content).await?;

		let drawing_path = match &request.drawing {
			Some(drawing) => {
				let path = directory.join(DRAWING_FILE);
				write_file(&path, &drawing.content).await?;
				Some(path)
			},
			None => None,
		};

		Ok((model_path, drawing_path))
	}
}

/// Owns a freshly created request directory until staging completes
///
/// Dropping it while armed removes the directory, which covers both a failed
/// write and a stage future dropped mid-write.
struct PartialStage {
	directory: Option<PathBuf>,
}

impl PartialStage {
	fn arm(directory: &Path) -> Self {
		Self {
			directory: Some(directory.to_path_buf()),
		}
	}

	/// Hand ownership of the directory to the caller
	fn disarm(mut self) {
		self.directory = None;
	}
}

impl Drop for PartialStage {
	fn drop(&mut self) {
		let Some(directory) = self.directory.take() else {
			return;
		};
		match std::fs::remove_dir_all(&directory) {
			Ok(()) => debug!("Removed partial staging directory {}", directory.display()),
			Err(e) if e.kind() == ErrorKind::NotFound => {},
			Err(e) => warn!(
				"Failed to clean partial staging directory {}: {}",
				directory.display(),
				e
			),
		}
	}
}

async fn write_file(path: &Path, content: &[u8]) -> StagingResult<()> {
	tokio::fs::write(path, content)
		.await
		.map_err(|source| StagingError::WriteFile {
			file: path.display().to_string(),
			source,
		})
}

#[async_trait]
impl StagingArea for FsStagingArea {
	async fn stage(
		&self,
		quote_id: &QuoteId,
		request: &QuoteRequest,
	) -> StagingResult<StagedFileSet> {
		let directory = self.request_dir(quote_id)?;
		self.prepare().await?;

		match tokio::fs::create_dir(&directory).await {
			Ok(()) => {},
			Err(e) if e.kind() == ErrorKind::AlreadyExists => {
				return Err(StagingError::Collision {
					quote_id: quote_id.to_string(),
				});
			},
			Err(source) => {
				return Err(StagingError::CreateDirectory {
					path: directory.display().to_string(),
					source,
				});
			},
		}

		let partial = PartialStage::arm(&directory);
		let (model_path, drawing_path) = self.write_files(&directory, request).await?;
		partial.disarm();

		debug!(
			"Staged quote {} ({} model bytes, drawing: {})",
			quote_id,
			request.model.len(),
			drawing_path.is_some()
		);
		Ok(StagedFileSet::new(
			quote_id.clone(),
			directory,
			model_path,
			drawing_path,
		))
	}

	fn release(&self, files: &StagedFileSet) -> StagingResult<()> {
		match std::fs::remove_dir_all(files.directory()) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(source) => Err(StagingError::Remove {
				path: files.directory().display().to_string(),
				source,
			}),
		}
	}

	async fn health_check(&self) -> StagingResult<bool> {
		self.prepare().await?;
		let writable = tokio::fs::metadata(&self.root)
			.await
			.map(|meta| meta.is_dir() && !meta.permissions().readonly())
			.unwrap_or(false);
		Ok(writable)
	}
}
