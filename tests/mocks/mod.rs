//! Shared fixtures for the E2E suites

pub mod fixtures;
pub mod staging;
pub mod test_server;

#[allow(unused_imports)]
pub use fixtures::QuoteForm;
#[allow(unused_imports)]
pub use staging::CountingStagingArea;
#[allow(unused_imports)]
pub use test_server::TestServer;
