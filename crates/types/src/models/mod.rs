//! Shared supporting models

pub mod health;
pub mod secret_string;

pub use health::{HealthResponse, ReadinessResponse};
pub use secret_string::SecretString;
