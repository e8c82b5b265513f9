//! Security-related HTTP response headers

use axum::{
	http::header::{HeaderName, HeaderValue},
	Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Headers added to every response unless a handler already set them
const SECURITY_HEADERS: &[(&str, &str)] = &[
	(
		"strict-transport-security",
		"max-age=31536000; includeSubDomains; preload",
	),
	("x-content-type-options", "nosniff"),
	("x-frame-options", "DENY"),
	("referrer-policy", "strict-origin-when-cross-origin"),
	("content-security-policy", "default-src 'self'"),
	// quotes are priced per upload and must not be replayed from caches
	("cache-control", "no-store"),
];

pub fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	SECURITY_HEADERS
		.iter()
		.fold(router, |router, &(name, value)| {
			router.layer(SetResponseHeaderLayer::if_not_present(
				HeaderName::from_static(name),
				HeaderValue::from_static(value),
			))
		})
}
