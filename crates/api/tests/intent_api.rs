//! Integration tests for the hosted `POST /api/v1/intent` endpoint.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;
use sherlock_intent::http::HttpIntentService;
use sherlock_intent::{IntentResolver, IntentService, IntentSource};

#[tokio::test]
async fn keyword_extractor_returns_flat_intent() {
    let app = common::build_test_app(common::keyword_state());

    let response = post_json(app, "/api/v1/intent", json!({ "query": "Find a red car" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json.get("data").is_none());
    assert_eq!(json["targets"], json!(["car", "red"]));
    assert_eq!(json["colors"], json!([]));
    assert_eq!(json["pairs"], json!([]));
}

#[tokio::test]
async fn empty_query_yields_empty_intent() {
    let app = common::build_test_app(common::keyword_state());

    let json = body_json(post_json(app, "/api/v1/intent", json!({ "query": "" })).await).await;

    assert_eq!(json["targets"], json!([]));
}

#[tokio::test]
async fn hosted_endpoint_serves_as_remote_intent_service() {
    let app = common::build_test_app(common::keyword_state());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let service = HttpIntentService::new(
        format!("http://{addr}/api/v1/intent"),
        Duration::from_secs(5),
    )
    .unwrap();

    let raw = service.suggest("spot the blue truck").await.unwrap();
    assert_eq!(raw["targets"], json!(["blue", "truck"]));

    let interpretation = IntentResolver::new(Arc::new(service))
        .interpret("spot the blue truck")
        .await;
    assert_eq!(interpretation.source, IntentSource::Service);
    assert_eq!(interpretation.notice, None);
}
