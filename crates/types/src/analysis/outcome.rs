//! Typed result of one analysis run

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A point in model space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Point3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

/// Axis-aligned extents of the part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BoundingBox {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl BoundingBox {
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	pub fn is_valid(&self) -> bool {
		[self.x, self.y, self.z]
			.iter()
			.all(|extent| extent.is_finite() && *extent >= 0.0)
	}
}

/// One manufacturability finding, passed through from the engine unmodified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DfmIssue {
	#[serde(rename = "type")]
	pub issue_type: String,
	pub severity: String,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location: Option<Point3>,
}

/// Itemized cost figures
///
/// Engines emit snake_case; the quote response uses camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
	#[serde(default, alias = "material_cost", skip_serializing_if = "Option::is_none")]
	pub material_cost: Option<f64>,
	#[serde(default, alias = "machining_cost", skip_serializing_if = "Option::is_none")]
	pub machining_cost: Option<f64>,
	#[serde(default, alias = "finishing_cost", skip_serializing_if = "Option::is_none")]
	pub finishing_cost: Option<f64>,
	#[serde(default, alias = "setup_cost", skip_serializing_if = "Option::is_none")]
	pub setup_cost: Option<f64>,
	pub total: f64,
}

/// Price figures of a manufacturable part
#[derive(Debug, Clone, PartialEq)]
pub enum Pricing {
	/// Only a single estimate was reported
	Basic { price: f64 },
	/// An itemized breakdown was reported, possibly alongside an estimate
	Itemized {
		breakdown: CostBreakdown,
		basic_price: Option<f64>,
	},
}

impl Pricing {
	/// The authoritative figure: the itemized total when present
	pub fn resolved_price(&self) -> f64 {
		match self {
			Self::Basic { price } => *price,
			Self::Itemized { breakdown, .. } => breakdown.total,
		}
	}

	pub fn breakdown(&self) -> Option<&CostBreakdown> {
		match self {
			Self::Basic { .. } => None,
			Self::Itemized { breakdown, .. } => Some(breakdown),
		}
	}

	/// `(total, basic)` when both figures are present and differ by more than a cent
	pub fn disagreement(&self) -> Option<(f64, f64)> {
		match self {
			Self::Itemized {
				breakdown,
				basic_price: Some(basic),
			} if (breakdown.total - basic).abs() >= 0.01 => Some((breakdown.total, *basic)),
			_ => None,
		}
	}
}

/// Everything needed to price a manufacturable part
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionEstimate {
	pub pricing: Pricing,
	pub lead_time_days: u32,
	pub bounding_box: BoundingBox,
	pub volume: Option<f64>,
	pub surface_area: Option<f64>,
}

/// Decision of the analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
	Manufacturable(ProductionEstimate),
	NotManufacturable,
}

/// Parsed result of invoking the engine; produced once, consumed once
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
	pub verdict: Verdict,
	pub issues: Vec<DfmIssue>,
}

impl AnalysisOutcome {
	pub fn manufacturable(estimate: ProductionEstimate, issues: Vec<DfmIssue>) -> Self {
		Self {
			verdict: Verdict::Manufacturable(estimate),
			issues,
		}
	}

	pub fn not_manufacturable(issues: Vec<DfmIssue>) -> Self {
		Self {
			verdict: Verdict::NotManufacturable,
			issues,
		}
	}

	pub fn is_manufacturable(&self) -> bool {
		matches!(self.verdict, Verdict::Manufacturable(_))
	}
}
