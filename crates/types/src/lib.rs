//! DFM Types
//!
//! Shared models and traits for the manufacturing quote service: the
//! parameter catalog, quote requests and responses, the analysis engine
//! contract and the staging contract.

pub mod analysis;
pub mod catalog;
pub mod constants;
pub mod models;
pub mod quotes;
pub mod staging;
pub mod test_utils;

pub use serde_json;

pub use catalog::{CatalogView, Finish, Material, ParameterMatrix, Process, UnknownTag};

pub use quotes::{
	ManufacturingDetails, ModelFormat, QuoteError, QuoteId, QuoteRequest, QuoteResponse,
	QuoteResult, QuoteValidationError, QuoteValidationResult, RawQuoteRequest, UploadedFile,
	DFM_REJECTION_MESSAGE,
};

pub use analysis::{
	AnalysisEngine, AnalysisError, AnalysisOutcome, AnalysisResult, BoundingBox, CostBreakdown,
	DfmIssue, EngineInfo, EngineInvocation, EngineMethod, EngineReport, Pricing,
	ProductionEstimate, Verdict,
};

pub use staging::{StagedFileSet, StagingArea, StagingError, StagingResult};

pub use models::{HealthResponse, ReadinessResponse, SecretString};
