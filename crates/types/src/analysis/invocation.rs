//! Translation from the platform vocabulary to the engine's

use serde::{Serialize, Serializer};
use std::path::PathBuf;

use crate::catalog::Process;
use crate::quotes::{QuoteId, QuoteRequest};

/// Method tag understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMethod {
	CncMachining,
	Printing3d,
	SheetMetal,
}

impl EngineMethod {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::CncMachining => "cnc",
			Self::Printing3d => "3d_printing",
			Self::SheetMetal => "sheet_metal",
		}
	}
}

impl Serialize for EngineMethod {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// Engine method for each platform process
pub fn engine_method(process: Process) -> EngineMethod {
	match process {
		Process::Cnc => EngineMethod::CncMachining,
		Process::Sla | Process::Sls | Process::Fdm => EngineMethod::Printing3d,
		Process::SheetMetal => EngineMethod::SheetMetal,
	}
}

/// One unit of analysis work, in engine vocabulary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineInvocation {
	pub quote_id: QuoteId,
	/// Absolute path of the staged model
	pub model_path: PathBuf,
	pub method: EngineMethod,
	/// Printing technology (`sla`, `sls`, `fdm`); only for 3D printing
	#[serde(skip_serializing_if = "Option::is_none")]
	pub technology: Option<String>,
	pub material: String,
	/// Lower-cased finish tag
	pub finish: String,
	pub detailed: bool,
}

impl EngineInvocation {
	/// Build the invocation for a validated request and its staged model
	pub fn translate(quote_id: QuoteId, model_path: PathBuf, request: &QuoteRequest) -> Self {
		let method = engine_method(request.process);
		let technology = match method {
			EngineMethod::Printing3d => request
				.process
				.printing_technology()
				.map(|suffix| suffix.to_ascii_lowercase()),
			_ => None,
		};

		Self {
			quote_id,
			model_path,
			method,
			technology,
			material: request.material.as_str().to_string(),
			finish: request.finish.as_str().to_ascii_lowercase(),
			detailed: true,
		}
	}
}
