//! DFM Service
//!
//! Quote orchestration: the analysis client with its deadline and
//! concurrency cap, the pure quote assembler and the quote service that
//! drives a request from upload to response.

pub mod analysis;
pub mod assembler;
pub mod quote;

pub use analysis::AnalysisClient;
pub use assembler::QuoteAssembler;
pub use quote::{failure_response, QuoteService, QuoteServiceTrait};
