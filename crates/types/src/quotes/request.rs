//! Quote request models and validation

use bytes::Bytes;
use std::fmt;
use std::path::Path;

use crate::catalog::{join_tags, Finish, Material, ParameterMatrix, Process};

use super::{QuoteValidationError, QuoteValidationResult};

/// Accepted 3D model extensions, lower-case
pub const MODEL_EXTENSIONS: &[&str] = &["stl", "step", "stp"];

/// Accepted technical drawing extensions, lower-case
pub const DRAWING_EXTENSIONS: &[&str] = &["pdf"];

/// A file part received with the request
#[derive(Clone, PartialEq)]
pub struct UploadedFile {
	/// Filename as sent by the client; never used as a path
	pub filename: String,
	pub content: Bytes,
}

impl UploadedFile {
	pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
		Self {
			filename: filename.into(),
			content: content.into(),
		}
	}

	/// Lower-cased extension of the client filename
	pub fn extension(&self) -> Option<String> {
		Path::new(self.filename.trim())
			.extension()
			.and_then(|ext| ext.to_str())
			.map(|ext| ext.to_ascii_lowercase())
	}

	/// Browsers submit an empty part when no file was chosen
	pub fn is_blank(&self) -> bool {
		self.filename.trim().is_empty() || self.content.is_empty()
	}

	pub fn len(&self) -> usize {
		self.content.len()
	}

	pub fn is_empty(&self) -> bool {
		self.content.is_empty()
	}
}

impl fmt::Debug for UploadedFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UploadedFile")
			.field("filename", &self.filename)
			.field("bytes", &self.content.len())
			.finish()
	}
}

/// Geometry container format of the primary model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
	Stl,
	Step,
}

impl ModelFormat {
	/// `stp` is the short form of STEP
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext {
			"stl" => Some(Self::Stl),
			"step" | "stp" => Some(Self::Step),
			_ => None,
		}
	}

	/// Extension used for the staged copy
	pub fn extension(&self) -> &'static str {
		match self {
			Self::Stl => "stl",
			Self::Step => "step",
		}
	}
}

/// Unvalidated quote request as parsed from the upload
#[derive(Debug, Clone, Default)]
pub struct RawQuoteRequest {
	pub process: Option<String>,
	pub material: Option<String>,
	pub finish: Option<String>,
	pub model_file: Option<UploadedFile>,
	pub drawing_file: Option<UploadedFile>,
}

/// A quote request that passed validation
///
/// Material and finish are guaranteed to be offered for the process, the model
/// is a supported format and the drawing, if any, is a PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
	pub process: Process,
	pub material: Material,
	pub finish: Finish,
	pub model: UploadedFile,
	pub model_format: ModelFormat,
	pub drawing: Option<UploadedFile>,
}

impl RawQuoteRequest {
	/// Validate against the parameter matrix and the file rules
	///
	/// Checks run in a fixed order and stop at the first failure:
	/// process, material, finish, model presence, model format, drawing format.
	/// Pure: nothing here touches the filesystem.
	pub fn validate(self, matrix: &ParameterMatrix) -> QuoteValidationResult<QuoteRequest> {
		let process_value = normalized(self.process.as_deref());
		let process = process_value
			.parse::<Process>()
			.ok()
			.filter(|process| matrix.supports_process(*process))
			.ok_or_else(|| QuoteValidationError::InvalidProcess {
				value: process_value.to_string(),
				allowed: join_tags(matrix.processes()),
			})?;

		let material_value = normalized(self.material.as_deref());
		let material = material_value
			.parse::<Material>()
			.ok()
			.filter(|material| matrix.supports_material(process, *material))
			.ok_or_else(|| QuoteValidationError::InvalidMaterial {
				process,
				value: material_value.to_string(),
				allowed: join_tags(matrix.materials(process)),
			})?;

		let finish_value = normalized(self.finish.as_deref());
		let finish = finish_value
			.parse::<Finish>()
			.ok()
			.filter(|finish| matrix.supports_finish(process, *finish))
			.ok_or_else(|| QuoteValidationError::InvalidFinish {
				process,
				value: finish_value.to_string(),
				allowed: join_tags(matrix.finishes(process)),
			})?;

		let model = self
			.model_file
			.filter(|file| !file.is_blank())
			.ok_or_else(|| QuoteValidationError::MissingModelFile {
				allowed: join_extensions(MODEL_EXTENSIONS),
			})?;

		let model_format = model
			.extension()
			.as_deref()
			.and_then(ModelFormat::from_extension)
			.ok_or_else(|| QuoteValidationError::UnsupportedModelFormat {
				filename: model.filename.clone(),
				allowed: join_extensions(MODEL_EXTENSIONS),
			})?;

		let drawing = match self.drawing_file.filter(|file| !file.is_blank()) {
			Some(drawing) => {
				let is_pdf = drawing
					.extension()
					.is_some_and(|ext| DRAWING_EXTENSIONS.contains(&ext.as_str()));
				if !is_pdf {
					return Err(QuoteValidationError::UnsupportedDrawingFormat {
						filename: drawing.filename.clone(),
						allowed: join_extensions(DRAWING_EXTENSIONS),
					});
				}
				Some(drawing)
			},
			None => None,
		};

		Ok(QuoteRequest {
			process,
			material,
			finish,
			model,
			model_format,
			drawing,
		})
	}
}

fn normalized(value: Option<&str>) -> &str {
	value.map(str::trim).unwrap_or_default()
}

fn join_extensions(extensions: &[&str]) -> String {
	join_tags(extensions.iter().map(|ext| format!(".{}", ext)))
}
