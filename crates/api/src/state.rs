use std::sync::Arc;

use dfm_service::QuoteServiceTrait;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub quote_service: Arc<dyn QuoteServiceTrait>,
	/// Largest accepted upload, reported back when a request exceeds it
	pub max_upload_bytes: usize,
}
