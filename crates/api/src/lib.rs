//! DFM API
//!
//! Axum-based HTTP surface for the DFM quote service: routes, handlers and
//! middleware.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use handlers::common::QUOTE_ID_HEADER;
pub use router::create_router;
pub use state::AppState;

#[cfg(feature = "openapi")]
pub mod openapi;
