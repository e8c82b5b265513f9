//! Quote assembly
//!
//! Pure mapping from a validated request and its analysis outcome to the
//! response body. Same inputs, same response.

use dfm_types::{
	AnalysisOutcome, CostBreakdown, ManufacturingDetails, QuoteId, QuoteRequest, QuoteResponse,
	Verdict,
};

#[derive(Debug, Clone)]
pub struct QuoteAssembler {
	currency: String,
}

impl QuoteAssembler {
	pub fn new(currency: impl Into<String>) -> Self {
		Self {
			currency: currency.into(),
		}
	}

	pub fn currency(&self) -> &str {
		&self.currency
	}

	pub fn assemble(
		&self,
		quote_id: QuoteId,
		request: &QuoteRequest,
		outcome: AnalysisOutcome,
	) -> QuoteResponse {
		match outcome.verdict {
			Verdict::NotManufacturable => QuoteResponse::rejected(quote_id, outcome.issues),
			Verdict::Manufacturable(estimate) => {
				let price = round_cents(estimate.pricing.resolved_price());
				let details = ManufacturingDetails {
					process: request.process,
					material: request.material,
					finish: request.finish,
					bounding_box: estimate.bounding_box,
					volume: estimate.volume,
					surface_area: estimate.surface_area,
					cost_breakdown: estimate.pricing.breakdown().map(rounded_breakdown),
				};
				QuoteResponse::quoted(
					quote_id,
					price,
					self.currency.clone(),
					estimate.lead_time_days,
					details,
				)
			},
		}
	}
}

impl Default for QuoteAssembler {
	fn default() -> Self {
		Self::new(dfm_types::constants::limits::DEFAULT_CURRENCY)
	}
}

fn round_cents(amount: f64) -> f64 {
	(amount * 100.0).round() / 100.0
}

fn rounded_breakdown(breakdown: &CostBreakdown) -> CostBreakdown {
	CostBreakdown {
		material_cost: breakdown.material_cost.map(round_cents),
		machining_cost: breakdown.machining_cost.map(round_cents),
		finishing_cost: breakdown.finishing_cost.map(round_cents),
		setup_cost: breakdown.setup_cost.map(round_cents),
		total: round_cents(breakdown.total),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dfm_types::test_utils::{
		itemized_report, manufacturable_report, rejection_report, thin_wall_issue,
		RawQuoteRequestBuilder,
	};
	use dfm_types::{EngineReport, ParameterMatrix, DFM_REJECTION_MESSAGE};

	fn request() -> QuoteRequest {
		RawQuoteRequestBuilder::cnc_aluminum()
			.finish(Some("ANODIZED"))
			.build()
			.validate(&ParameterMatrix::standard())
			.unwrap()
	}

	fn outcome(report: EngineReport) -> AnalysisOutcome {
		AnalysisOutcome::try_from(report).unwrap()
	}

	#[test]
	fn test_manufacturable_outcome_is_quoted() {
		let assembler = QuoteAssembler::new("USD");
		let response = assembler.assemble(
			QuoteId::from("q_1"),
			&request(),
			outcome(manufacturable_report(41.999, 6, (100.0, 50.0, 20.0))),
		);

		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["success"], true);
		assert_eq!(json["quoteId"], "q_1");
		assert_eq!(json["price"], 42.0);
		assert_eq!(json["currency"], "USD");
		assert_eq!(json["leadTimeInDays"], 6);
		assert_eq!(json["manufacturingDetails"]["process"], "CNC");
		assert_eq!(json["manufacturingDetails"]["material"], "ALUMINUM_6061");
		assert_eq!(json["manufacturingDetails"]["finish"], "ANODIZED");
		assert_eq!(json["manufacturingDetails"]["boundingBox"]["x"], 100.0);
		assert!(json["manufacturingDetails"].get("costBreakdown").is_none());
		assert_eq!(response.status_code(), 200);
	}

	#[test]
	fn test_itemized_total_is_price() {
		let assembler = QuoteAssembler::default();
		let response = assembler.assemble(
			QuoteId::from("q_2"),
			&request(),
			outcome(itemized_report(150.0, Some(140.0))),
		);

		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["price"], 150.0);
		assert_eq!(json["manufacturingDetails"]["costBreakdown"]["total"], 150.0);
		assert_eq!(json["manufacturingDetails"]["costBreakdown"]["materialCost"], 60.0);
		assert_eq!(json["manufacturingDetails"]["volume"], 18_000.0);
	}

	#[test]
	fn test_rejection_carries_issues() {
		let assembler = QuoteAssembler::default();
		let response = assembler.assemble(
			QuoteId::from("q_3"),
			&request(),
			outcome(rejection_report(vec![thin_wall_issue()])),
		);

		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["success"], false);
		assert_eq!(json["quoteId"], "q_3");
		assert_eq!(json["message"], DFM_REJECTION_MESSAGE);
		assert_eq!(json["dfmIssues"][0]["type"], "thin_wall");
		assert_eq!(json["dfmIssues"][0]["severity"], "high");
		assert_eq!(response.status_code(), 400);
	}

	#[test]
	fn test_assembly_is_deterministic() {
		let assembler = QuoteAssembler::new("EUR");
		let request = request();
		let report = itemized_report(99.999, None);

		let first = assembler.assemble(QuoteId::from("q_4"), &request, outcome(report.clone()));
		let second = assembler.assemble(QuoteId::from("q_4"), &request, outcome(report));

		assert_eq!(
			serde_json::to_vec(&first).unwrap(),
			serde_json::to_vec(&second).unwrap()
		);
	}

	#[test]
	fn test_round_cents() {
		assert_eq!(round_cents(10.004), 10.0);
		assert_eq!(round_cents(10.006), 10.01);
		assert_eq!(round_cents(0.0), 0.0);
	}
}
