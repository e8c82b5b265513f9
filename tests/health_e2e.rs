//! End-to-end tests for health and readiness

mod mocks;

use crate::mocks::TestServer;
use dfm_quote::CannedEngine;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint() {
	let server = TestServer::spawn().await.unwrap();

	let resp = Client::new()
		.get(format!("{}/health", server.base_url))
		.send()
		.await
		.unwrap();
	assert!(resp.status().is_success());

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "healthy");
	assert!(body["version"].is_string());

	server.abort();
}

#[tokio::test]
async fn test_ready_with_healthy_engine() {
	let server = TestServer::spawn().await.unwrap();

	let resp = Client::new()
		.get(format!("{}/ready", server.base_url))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 200);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "ready");
	assert_eq!(body["engine"], "canned");
	assert_eq!(body["stagingHealthy"], true);
	assert_eq!(body["engineHealthy"], true);

	server.abort();
}

#[tokio::test]
async fn test_ready_with_unhealthy_engine() {
	let engine = Arc::new(CannedEngine::demo().unhealthy());
	let server = TestServer::spawn_with_engine(engine).await.unwrap();

	let resp = Client::new()
		.get(format!("{}/ready", server.base_url))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 503);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "not_ready");

	server.abort();
}

#[tokio::test]
async fn test_security_headers_present() {
	let server = TestServer::spawn().await.unwrap();

	let resp = Client::new()
		.get(format!("{}/health", server.base_url))
		.send()
		.await
		.unwrap();
	assert_eq!(
		resp.headers().get("x-content-type-options").unwrap(),
		"nosniff"
	);
	assert!(resp.headers().contains_key("x-request-id"));

	server.abort();
}
