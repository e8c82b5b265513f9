//! End-to-end tests for the quote endpoint

mod mocks;

use crate::mocks::{QuoteForm, TestServer};
use dfm_quote::{AnalysisError, CannedEngine, QUOTE_ID_HEADER};
use dfm_types::test_utils::{
	itemized_report, manufacturable_report, rejection_report, thin_wall_issue, SAMPLE_STL,
};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

async fn post(server: &TestServer, form: QuoteForm) -> reqwest::Response {
	Client::new()
		.post(server.quotes_url())
		.multipart(form.into_form())
		.send()
		.await
		.unwrap()
}

#[tokio::test]
async fn test_manufacturable_part_is_quoted() {
	let engine = Arc::new(CannedEngine::with_report(manufacturable_report(
		42.50,
		5,
		(10.0, 10.0, 10.0),
	)));
	let server = TestServer::spawn_with_engine(engine.clone()).await.unwrap();

	let resp = post(&server, QuoteForm::cnc_aluminum()).await;
	assert_eq!(resp.status(), 200);
	let header_id = resp
		.headers()
		.get(QUOTE_ID_HEADER.as_str())
		.and_then(|v| v.to_str().ok())
		.map(str::to_string)
		.unwrap();

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], true);
	assert_eq!(body["price"], 42.5);
	assert_eq!(body["currency"], "USD");
	assert_eq!(body["leadTimeInDays"], 5);
	assert_eq!(body["quoteId"], header_id.as_str());

	let details = &body["manufacturingDetails"];
	assert_eq!(details["process"], "CNC");
	assert_eq!(details["material"], "ALUMINUM_6061");
	assert_eq!(details["finish"], "STANDARD");
	assert_eq!(details["boundingBox"]["x"], 10.0);
	assert_eq!(details["boundingBox"]["y"], 10.0);
	assert_eq!(details["boundingBox"]["z"], 10.0);

	let invocation = engine.last_invocation().unwrap();
	assert_eq!(invocation.quote_id.as_str(), header_id);
	assert_eq!(invocation.material, "ALUMINUM_6061");

	assert_eq!(server.staging.staged(), 1);
	assert_eq!(server.staging.releases(), 1);
	assert_eq!(server.staging.directories_on_disk(), 0);

	server.abort();
}

#[tokio::test]
async fn test_itemized_breakdown_is_returned() {
	let engine = Arc::new(CannedEngine::with_report(itemized_report(200.0, None)));
	let server = TestServer::spawn_with_engine(engine).await.unwrap();

	let resp = post(&server, QuoteForm::cnc_aluminum()).await;
	assert_eq!(resp.status(), 200);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["price"], 200.0);
	assert_eq!(body["leadTimeInDays"], 10);
	let details = &body["manufacturingDetails"];
	assert_eq!(details["volume"], 18000.0);
	assert_eq!(details["surfaceArea"], 6400.0);
	assert_eq!(details["costBreakdown"]["total"], 200.0);

	server.abort();
}

#[tokio::test]
async fn test_dfm_rejection_lists_issues() {
	let engine = Arc::new(CannedEngine::with_report(rejection_report(vec![
		thin_wall_issue(),
	])));
	let server = TestServer::spawn_with_engine(engine).await.unwrap();

	let resp = post(&server, QuoteForm::cnc_aluminum()).await;
	assert_eq!(resp.status(), 400);
	assert!(resp.headers().contains_key(QUOTE_ID_HEADER.as_str()));

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);
	assert!(body.get("price").is_none());
	let issues = body["dfmIssues"].as_array().unwrap();
	assert_eq!(issues.len(), 1);
	assert_eq!(issues[0]["type"], "thin_wall");
	assert_eq!(issues[0]["severity"], "high");

	assert_eq!(server.staging.releases(), server.staging.staged());
	assert_eq!(server.staging.directories_on_disk(), 0);

	server.abort();
}

#[tokio::test]
async fn test_invalid_material_never_stages() {
	let engine = Arc::new(CannedEngine::demo());
	let server = TestServer::spawn_with_engine(engine.clone()).await.unwrap();

	let form = QuoteForm::new("SHEET_METAL", "PEEK", "STANDARD").model("panel.step", SAMPLE_STL.to_vec());
	let resp = post(&server, form).await;
	assert_eq!(resp.status(), 400);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);
	let error = body["error"].as_str().unwrap();
	assert!(error.contains("PEEK"));
	assert!(error.contains("SHEET_METAL"));

	assert_eq!(server.staging.stage_calls(), 0);
	assert_eq!(server.staging.directories_on_disk(), 0);
	assert_eq!(engine.call_count(), 0);

	server.abort();
}

#[tokio::test]
async fn test_unknown_process_is_rejected() {
	let server = TestServer::spawn().await.unwrap();

	let form = QuoteForm::new("LASER", "ALUMINUM_6061", "STANDARD").model("part.stl", SAMPLE_STL.to_vec());
	let resp = post(&server, form).await;
	assert_eq!(resp.status(), 400);

	let body: Value = resp.json().await.unwrap();
	let error = body["error"].as_str().unwrap();
	assert!(error.contains("LASER"));
	assert!(error.contains("CNC"));
	assert_eq!(server.staging.stage_calls(), 0);

	server.abort();
}

#[tokio::test]
async fn test_unsupported_model_format_is_rejected() {
	let server = TestServer::spawn().await.unwrap();

	let form = QuoteForm::new("CNC", "ALUMINUM_6061", "STANDARD").model("part.doc", b"not a model".to_vec());
	let resp = post(&server, form).await;
	assert_eq!(resp.status(), 400);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);
	assert!(body["error"].as_str().unwrap().contains("part.doc"));
	assert_eq!(server.staging.stage_calls(), 0);

	server.abort();
}

#[tokio::test]
async fn test_missing_model_is_rejected() {
	let server = TestServer::spawn().await.unwrap();

	let resp = post(&server, QuoteForm::new("CNC", "ALUMINUM_6061", "STANDARD")).await;
	assert_eq!(resp.status(), 400);

	let body: Value = resp.json().await.unwrap();
	assert!(body["error"].as_str().unwrap().contains("3D model"));

	server.abort();
}

#[tokio::test]
async fn test_drawing_must_be_pdf() {
	let server = TestServer::spawn().await.unwrap();

	let form = QuoteForm::cnc_aluminum().drawing("drawing.png", b"png".to_vec());
	let resp = post(&server, form).await;
	assert_eq!(resp.status(), 400);
	assert_eq!(server.staging.stage_calls(), 0);

	server.abort();
}

#[tokio::test]
async fn test_drawing_is_staged_with_model() {
	let engine = Arc::new(CannedEngine::demo());
	let server = TestServer::spawn_with_engine(engine.clone()).await.unwrap();

	let form = QuoteForm::cnc_aluminum().drawing("drawing.pdf", b"%PDF-1.4".to_vec());
	let resp = post(&server, form).await;
	assert_eq!(resp.status(), 200);
	assert_eq!(engine.call_count(), 1);
	assert_eq!(server.staging.releases(), 1);

	server.abort();
}

#[tokio::test]
async fn test_model_field_aliases_are_accepted() {
	let server = TestServer::spawn().await.unwrap();

	for field in ["model", "file"] {
		let form = QuoteForm::new("CNC", "ALUMINUM_6061", "STANDARD").model_as(
			field,
			"bracket.stl",
			SAMPLE_STL.to_vec(),
		);
		let resp = post(&server, form).await;
		assert_eq!(resp.status(), 200, "field {}", field);
	}

	server.abort();
}

#[tokio::test]
async fn test_malformed_multipart_is_rejected() {
	let server = TestServer::spawn().await.unwrap();

	let resp = Client::new()
		.post(server.quotes_url())
		.header("content-type", "multipart/form-data; boundary=missing")
		.body("this is not multipart")
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), 400);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);
	assert_eq!(server.staging.stage_calls(), 0);

	server.abort();
}

#[tokio::test]
async fn test_analysis_timeout_cleans_up() {
	let engine = Arc::new(CannedEngine::demo().with_delay(Duration::from_secs(5)));
	let server = TestServer::spawn_with_engine(engine).await.unwrap();

	let resp = post(&server, QuoteForm::cnc_aluminum()).await;
	assert_eq!(resp.status(), 500);
	assert!(resp.headers().contains_key(QUOTE_ID_HEADER.as_str()));

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);
	assert!(body["error"].as_str().unwrap().contains("timed out"));

	assert_eq!(server.staging.staged(), 1);
	assert_eq!(server.staging.releases(), 1);
	assert_eq!(server.staging.directories_on_disk(), 0);

	server.abort();
}

#[tokio::test]
async fn test_engine_failure_hides_details() {
	let engine = Arc::new(CannedEngine::with_error(AnalysisError::EngineExit {
		status: "exit status: 1".to_string(),
		stderr: "Traceback: /srv/dfm/analyze.py line 12".to_string(),
	}));
	let server = TestServer::spawn_with_engine(engine).await.unwrap();

	let resp = post(&server, QuoteForm::cnc_aluminum()).await;
	assert_eq!(resp.status(), 500);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);
	let error = body["error"].as_str().unwrap();
	assert!(!error.contains("Traceback"));
	assert!(!error.contains("/srv"));

	assert_eq!(server.staging.releases(), 1);
	assert_eq!(server.staging.directories_on_disk(), 0);

	server.abort();
}

#[tokio::test]
async fn test_staging_failure_is_server_error() {
	let engine = Arc::new(CannedEngine::demo());
	let server = TestServer::spawn_with_engine(engine.clone()).await.unwrap();
	server.staging.fail_stages();

	let resp = post(&server, QuoteForm::cnc_aluminum()).await;
	assert_eq!(resp.status(), 500);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["success"], false);
	assert!(!body["error"].as_str().unwrap().contains("No space"));

	assert_eq!(server.staging.stage_calls(), 1);
	assert_eq!(server.staging.releases(), 0);
	assert_eq!(engine.call_count(), 0);

	server.abort();
}

#[tokio::test]
async fn test_concurrent_quotes_are_isolated() {
	let engine = Arc::new(CannedEngine::demo().with_delay(Duration::from_millis(50)));
	let server = TestServer::spawn_with_engine(engine.clone()).await.unwrap();
	let client = Client::new();

	let mut handles = Vec::new();
	for _ in 0..8 {
		let client = client.clone();
		let url = server.quotes_url();
		handles.push(tokio::spawn(async move {
			let resp = client
				.post(url)
				.multipart(QuoteForm::cnc_aluminum().into_form())
				.send()
				.await
				.unwrap();
			assert_eq!(resp.status(), 200);
			let body: Value = resp.json().await.unwrap();
			body["quoteId"].as_str().unwrap().to_string()
		}));
	}

	let mut ids = Vec::new();
	for handle in handles {
		ids.push(handle.await.unwrap());
	}
	ids.sort();
	ids.dedup();
	assert_eq!(ids.len(), 8);

	assert_eq!(engine.call_count(), 8);
	assert_eq!(server.staging.staged(), 8);
	assert_eq!(server.staging.releases(), 8);
	assert_eq!(server.staging.directories_on_disk(), 0);

	server.abort();
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
	let server = TestServer::spawn().await.unwrap();

	let oversized = vec![b'x'; 2 * 1024 * 1024];
	let form = QuoteForm::new("CNC", "ALUMINUM_6061", "STANDARD").model("huge.stl", oversized);
	let result = Client::new()
		.post(server.quotes_url())
		.multipart(form.into_form())
		.send()
		.await;
	// The server may close the connection before the whole body is sent
	if let Ok(resp) = result {
		assert_eq!(resp.status(), 413);
	}
	assert_eq!(server.staging.stage_calls(), 0);

	server.abort();
}
