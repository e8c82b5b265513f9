//! Analysis engine contract
//!
//! The DFM engine is an external collaborator. This module defines what is
//! sent to it ([`EngineInvocation`]), what comes back ([`EngineReport`]) and
//! the typed result the rest of the pipeline consumes ([`AnalysisOutcome`]).

pub mod errors;
pub mod invocation;
pub mod outcome;
pub mod report;
pub mod traits;

pub use errors::AnalysisError;
pub use invocation::{engine_method, EngineInvocation, EngineMethod};
pub use outcome::{
	AnalysisOutcome, BoundingBox, CostBreakdown, DfmIssue, Point3, Pricing, ProductionEstimate,
	Verdict,
};
pub use report::EngineReport;
pub use traits::{AnalysisEngine, EngineInfo};

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
