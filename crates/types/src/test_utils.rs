//! Test utilities for creating common test objects
//!
//! Builders with sensible defaults for raw quote requests and engine reports,
//! shared by the unit tests of every crate and the E2E suites.

use crate::analysis::{BoundingBox, CostBreakdown, DfmIssue, EngineReport};
use crate::quotes::{RawQuoteRequest, UploadedFile};

/// Minimal ASCII STL body
pub const SAMPLE_STL: &[u8] = b"solid cube\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid cube\n";

/// Builder for [`RawQuoteRequest`]
#[derive(Debug, Clone, Default)]
pub struct RawQuoteRequestBuilder {
	request: RawQuoteRequest,
}

impl RawQuoteRequestBuilder {
	/// Empty request: no fields, no files
	pub fn new() -> Self {
		Self::default()
	}

	/// CNC / ALUMINUM_6061 / STANDARD with an STL model
	pub fn cnc_aluminum() -> Self {
		Self::new()
			.process(Some("CNC"))
			.material(Some("ALUMINUM_6061"))
			.finish(Some("STANDARD"))
			.model("bracket.stl", SAMPLE_STL.to_vec())
	}

	pub fn process(mut self, value: Option<&str>) -> Self {
		self.request.process = value.map(str::to_string);
		self
	}

	pub fn material(mut self, value: Option<&str>) -> Self {
		self.request.material = value.map(str::to_string);
		self
	}

	pub fn finish(mut self, value: Option<&str>) -> Self {
		self.request.finish = value.map(str::to_string);
		self
	}

	pub fn model(mut self, filename: &str, content: Vec<u8>) -> Self {
		self.request.model_file = Some(UploadedFile::new(filename, content));
		self
	}

	pub fn no_model(mut self) -> Self {
		self.request.model_file = None;
		self
	}

	pub fn drawing(mut self, filename: &str, content: Vec<u8>) -> Self {
		self.request.drawing_file = Some(UploadedFile::new(filename, content));
		self
	}

	pub fn build(self) -> RawQuoteRequest {
		self.request
	}
}

/// Manufacturable report with a basic price
pub fn manufacturable_report(price: f64, lead_time_days: u32, extents: (f64, f64, f64)) -> EngineReport {
	EngineReport {
		manufacturable: true,
		basic_price: Some(price),
		lead_time_days: Some(lead_time_days),
		bounding_box: Some(BoundingBox::new(extents.0, extents.1, extents.2)),
		..Default::default()
	}
}

/// Manufacturable report with an itemized breakdown
pub fn itemized_report(total: f64, basic_price: Option<f64>) -> EngineReport {
	EngineReport {
		manufacturable: true,
		cost_breakdown: Some(CostBreakdown {
			material_cost: Some(total * 0.4),
			machining_cost: Some(total * 0.5),
			finishing_cost: None,
			setup_cost: Some(total * 0.1),
			total,
		}),
		basic_price,
		lead_time_days: Some(10),
		bounding_box: Some(BoundingBox::new(50.0, 40.0, 12.0)),
		volume: Some(18_000.0),
		surface_area: Some(6_400.0),
		..Default::default()
	}
}

/// Rejection report with the given issues
pub fn rejection_report(issues: Vec<DfmIssue>) -> EngineReport {
	EngineReport {
		manufacturable: false,
		issues,
		..Default::default()
	}
}

/// The canonical thin-wall finding
pub fn thin_wall_issue() -> DfmIssue {
	DfmIssue {
		issue_type: "thin_wall".to_string(),
		severity: "high".to_string(),
		description: "wall thickness below 0.8mm".to_string(),
		location: None,
	}
}
