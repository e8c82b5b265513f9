//! DFM Quote Server
//!
//! Main entry point for the quote server

use dfm_quote::QuoteServerBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	QuoteServerBuilder::new().start_server().await
}
