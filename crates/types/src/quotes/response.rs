//! Quote response contract
//!
//! Exactly one of three shapes leaves the service per request:
//! a priced quote, a DFM rejection, or a request-level failure.

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::analysis::{BoundingBox, CostBreakdown, DfmIssue};
use crate::catalog::{Finish, Material, Process};

use super::QuoteId;

/// Message carried by every DFM rejection
pub const DFM_REJECTION_MESSAGE: &str = "Part cannot be manufactured due to DFM issues";

/// Externally observable result of a quote request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(untagged)]
pub enum QuoteResponse {
	Quoted(QuotedResponse),
	Rejected(RejectedResponse),
	Failed(FailureResponse),
}

/// A priced, deliverable quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuotedResponse {
	pub success: bool,
	#[cfg_attr(feature = "openapi", schema(value_type = String))]
	pub quote_id: QuoteId,
	pub price: f64,
	pub currency: String,
	pub lead_time_in_days: u32,
	pub manufacturing_details: ManufacturingDetails,
}

/// Echo of the selection plus the geometry reported by the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingDetails {
	#[cfg_attr(feature = "openapi", schema(value_type = String))]
	pub process: Process,
	#[cfg_attr(feature = "openapi", schema(value_type = String))]
	pub material: Material,
	#[cfg_attr(feature = "openapi", schema(value_type = String))]
	pub finish: Finish,
	pub bounding_box: BoundingBox,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub volume: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub surface_area: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cost_breakdown: Option<CostBreakdown>,
}

/// Analysis completed but the part cannot be produced as specified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RejectedResponse {
	pub success: bool,
	#[cfg_attr(feature = "openapi", schema(value_type = String))]
	pub quote_id: QuoteId,
	pub message: String,
	pub dfm_issues: Vec<DfmIssue>,
}

/// Request-level failure: validation or infrastructure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FailureResponse {
	pub success: bool,
	pub error: String,
}

impl QuoteResponse {
	pub fn quoted(
		quote_id: QuoteId,
		price: f64,
		currency: impl Into<String>,
		lead_time_in_days: u32,
		manufacturing_details: ManufacturingDetails,
	) -> Self {
		Self::Quoted(QuotedResponse {
			success: true,
			quote_id,
			price,
			currency: currency.into(),
			lead_time_in_days,
			manufacturing_details,
		})
	}

	pub fn rejected(quote_id: QuoteId, dfm_issues: Vec<DfmIssue>) -> Self {
		Self::Rejected(RejectedResponse {
			success: false,
			quote_id,
			message: DFM_REJECTION_MESSAGE.to_string(),
			dfm_issues,
		})
	}

	pub fn failure(error: impl Into<String>) -> Self {
		Self::Failed(FailureResponse {
			success: false,
			error: error.into(),
		})
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Quoted(_))
	}

	pub fn quote_id(&self) -> Option<&QuoteId> {
		match self {
			Self::Quoted(quoted) => Some(&quoted.quote_id),
			Self::Rejected(rejected) => Some(&rejected.quote_id),
			Self::Failed(_) => None,
		}
	}

	/// HTTP status for the quoted and rejected shapes
	///
	/// Failures carry their status on the originating `QuoteError`; here they
	/// default to 500.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::Quoted(_) => 200,
			Self::Rejected(_) => 400,
			Self::Failed(_) => 500,
		}
	}
}
