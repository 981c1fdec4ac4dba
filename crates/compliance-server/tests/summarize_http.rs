//! HTTP-level tests for the compliance server.
//!
//! These drive the real router with a scripted LLM client, so no API key or
//! network is needed.
//! Run with: cargo test -p compliance-server --test summarize_http

use std::sync::Arc;

use axum::body::Body;
use compliance_agentic::mock_client::MockLlmClient;
use compliance_agentic::{
    ComplianceReport, PipelineConfig, ReflectivePipeline, Severity, OUT_OF_SCOPE_SENTINEL,
};
use compliance_server::router::build_router;
use compliance_server::state::AppState;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

const UNAVAILABLE: &str =
    "The AI Auditor is currently unavailable. Please check your API key or connection.";

const DOCUMENT: &str = "Banks that miss the quarterly CTR deadline (5pm ET, business days) \
                        pay $250 per violation; repeated failure may lead to license revocation.";

// ── Helpers ───────────────────────────────────────────────────

fn build_app(client: &Arc<MockLlmClient>) -> axum::Router {
    let pipeline = ReflectivePipeline::new(client.clone(), PipelineConfig::default());
    build_router(AppState::new(pipeline))
}

fn summarize_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/summarize")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }))
}

fn report_payload() -> serde_json::Value {
    json!({
        "summary": "Quarterly CTR filings are due by 5pm ET on business days. AI-generated, for human review only.",
        "key_risks": [
            {"description": "$250 per violation for late CTR filing", "severity": "Critical"},
            {"description": "License revocation after repeated failures", "severity": "Critical"},
            {"description": "Filing cutoff is 5pm ET", "severity": "Medium"}
        ],
        "obligations": ["File CTRs quarterly before 5pm ET on a business day"],
        "recommended_actions": ["Schedule filings a day ahead of the cutoff"],
        "missing_info": "Which prior-year rule this replaces is not stated."
    })
}

fn happy_client() -> Arc<MockLlmClient> {
    Arc::new(
        MockLlmClient::new()
            .with_text("CTRs are due quarterly; late filings are fined.")
            .with_text("Draft misses the $250 per violation multiplier and the 5pm ET cutoff.")
            .with_structured(report_payload()),
    )
}

// ── Tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_summarize_success() {
    let client = happy_client();
    let app = build_app(&client);

    let resp = app
        .oneshot(summarize_request(json!({ "text": DOCUMENT })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;

    assert_eq!(body["draft"], "CTRs are due quarterly; late filings are fined.");
    assert_eq!(
        body["critique"],
        "Draft misses the $250 per violation multiplier and the 5pm ET cutoff."
    );

    let report: ComplianceReport = serde_json::from_value(body["final"].clone()).unwrap();
    assert_eq!(report.key_risks.len(), 3);
    assert!(report
        .key_risks
        .iter()
        .all(|r| Severity::ALL.contains(&r.severity)));
    // Disclaimer already present, so it is not repeated
    assert_eq!(report.summary.matches("human review only").count(), 1);

    assert_eq!(client.call_count(), 3);
}

#[tokio::test]
async fn test_summarize_out_of_scope() {
    let client = Arc::new(
        MockLlmClient::new()
            .with_text(OUT_OF_SCOPE_SENTINEL)
            .with_text("Nothing to audit.")
            .with_structured(json!({
                "summary": "Not a compliance document.",
                "key_risks": [],
                "obligations": [],
                "recommended_actions": [],
                "missing_info": ""
            })),
    );
    let app = build_app(&client);

    let resp = app
        .oneshot(summarize_request(
            json!({ "text": "What is the capital of France?" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body["draft"],
        "OUT OF SCOPE: This content does not contain regulatory or compliance data."
    );
    assert_eq!(body["final"]["key_risks"], json!([]));
}

#[tokio::test]
async fn test_summarize_empty_input_is_bad_request() {
    for text in ["", "    ", "\n\t"] {
        let client = happy_client();
        let app = build_app(&client);

        let resp = app
            .oneshot(summarize_request(json!({ "text": text })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({ "error": "Input text cannot be empty" })
        );
        assert_eq!(client.call_count(), 0);
    }
}

#[tokio::test]
async fn test_summarize_missing_report_field_is_unavailable() {
    let mut payload = report_payload();
    payload.as_object_mut().unwrap().remove("obligations");

    let client = Arc::new(
        MockLlmClient::new()
            .with_text("draft")
            .with_text("critique")
            .with_structured(payload),
    );
    let app = build_app(&client);

    let resp = app
        .oneshot(summarize_request(json!({ "text": DOCUMENT })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body, json!({ "error": UNAVAILABLE }));
    assert!(body.get("final").is_none());
}

#[tokio::test]
async fn test_summarize_transport_failure_per_stage() {
    let cases = [
        (MockLlmClient::new().with_failure("dns error"), 1),
        (
            MockLlmClient::new()
                .with_text("draft")
                .with_failure("503 overloaded"),
            2,
        ),
        (
            MockLlmClient::new()
                .with_text("draft")
                .with_text("critique")
                .with_failure("401 unauthorized"),
            3,
        ),
    ];

    for (client, expected_calls) in cases {
        let client = Arc::new(client);
        let app = build_app(&client);

        let resp = app
            .oneshot(summarize_request(json!({ "text": DOCUMENT })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body, json!({ "error": UNAVAILABLE }));
        assert!(!body.to_string().contains("unauthorized"));
        assert_eq!(client.call_count(), expected_calls);
    }
}

#[tokio::test]
async fn test_summarize_rejects_missing_text_field() {
    let client = happy_client();
    let app = build_app(&client);

    let resp = app
        .oneshot(summarize_request(json!({ "body": DOCUMENT })))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let client = happy_client();
    let app = build_app(&client);

    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/summarize")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_health_reports_provider() {
    let client = happy_client();
    let app = build_app(&client);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "Mock");
    assert_eq!(body["models"]["draft"], "gpt-4o-mini");
    assert_eq!(client.call_count(), 0);
}
