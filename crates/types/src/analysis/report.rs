//! Raw engine output and its conversion into an [`AnalysisOutcome`]

use serde::{Deserialize, Serialize};

use super::outcome::{
	AnalysisOutcome, BoundingBox, CostBreakdown, DfmIssue, Pricing, ProductionEstimate,
};
use super::AnalysisError;
use crate::constants::limits::DEFAULT_LEAD_TIME_DAYS;

/// JSON document produced by the analysis engine
///
/// Only `manufacturable` is always required. Absent optional fields fall
/// back to defaults: no issues, a lead time of [`DEFAULT_LEAD_TIME_DAYS`],
/// no geometry measures. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineReport {
	pub manufacturable: bool,
	#[serde(default)]
	pub issues: Vec<DfmIssue>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cost_breakdown: Option<CostBreakdown>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub basic_price: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lead_time_days: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bounding_box: Option<BoundingBox>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub volume: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub surface_area: Option<f64>,
}

impl EngineReport {
	/// Parse an engine's JSON output
	pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
		serde_json::from_str(text).map_err(|e| AnalysisError::malformed(&e))
	}
}

impl TryFrom<EngineReport> for AnalysisOutcome {
	type Error = AnalysisError;

	/// A manufacturable report must carry a bounding box and at least one
	/// price figure; a rejection needs neither.
	fn try_from(report: EngineReport) -> Result<Self, Self::Error> {
		if !report.manufacturable {
			return Ok(AnalysisOutcome::not_manufacturable(report.issues));
		}

		let bounding_box = report.bounding_box.ok_or_else(|| incomplete("bounding_box is missing"))?;
		if !bounding_box.is_valid() {
			return Err(incomplete("bounding_box has negative or non-finite extents"));
		}

		let pricing = match (report.cost_breakdown, report.basic_price) {
			(Some(breakdown), basic_price) => Pricing::Itemized {
				breakdown,
				basic_price,
			},
			(None, Some(price)) => Pricing::Basic { price },
			(None, None) => {
				return Err(incomplete(
					"neither cost_breakdown nor basic_price is present",
				))
			},
		};
		let price = pricing.resolved_price();
		if !price.is_finite() || price < 0.0 {
			return Err(incomplete("price is negative or non-finite"));
		}

		Ok(AnalysisOutcome::manufacturable(
			ProductionEstimate {
				pricing,
				lead_time_days: report.lead_time_days.unwrap_or(DEFAULT_LEAD_TIME_DAYS),
				bounding_box,
				volume: report.volume,
				surface_area: report.surface_area,
			},
			report.issues,
		))
	}
}

fn incomplete(reason: &str) -> AnalysisError {
	AnalysisError::IncompleteReport {
		reason: reason.to_string(),
	}
}
