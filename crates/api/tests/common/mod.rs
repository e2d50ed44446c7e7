use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use sherlock_api::config::{IntentConfig, ServerConfig};
use sherlock_api::routes;
use sherlock_api::state::AppState;
use sherlock_intent::IntentResolver;

/// Build a test `ServerConfig` with safe defaults and no intent provider.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_corpus_bytes: 64 * 1024,
        confidence_threshold: 0.6,
        intent: IntentConfig::keywords_only(),
    }
}

/// State whose query resolver and hosted extractor use keywords only.
pub fn keyword_state() -> AppState {
    AppState::new(
        test_config(),
        IntentResolver::keywords_only(),
        IntentResolver::keywords_only(),
    )
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack production uses.
pub fn build_test_app(state: AppState) -> Router {
    let max_corpus_bytes = state.config.max_corpus_bytes;

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes(max_corpus_bytes))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Body::from(body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Body::from(body.to_string())).await
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A small detector corpus shared by the API tests.
///
/// ```text
/// frame 0   @ 0.0s   red car 0.9, blue truck 0.8
/// frame 30  @ 1.0s   red car 0.9, person 0.55
/// frame 60  @ 65.5s  dog 0.7, person 0.9
/// ```
pub fn sample_corpus() -> serde_json::Value {
    serde_json::json!({
        "results": [
            {
                "frame_index": 0,
                "timestamp": 0.0,
                "objects": [
                    { "class": "car", "confidence": 0.9, "bbox": [0, 0, 10, 10], "color": "red" },
                    { "class": "truck", "confidence": 0.8, "bbox": [5, 5, 20, 20], "color": "blue" }
                ]
            },
            {
                "frame_index": 30,
                "timestamp": 1.0,
                "image": "data:image/jpeg;base64,AAAA",
                "objects": [
                    { "class": "car", "confidence": 0.9, "bbox": [0, 0, 10, 10], "color": "red" },
                    { "class": "person", "confidence": 0.55, "bbox": [1, 1, 2, 2] }
                ]
            },
            {
                "frame_index": 60,
                "timestamp": 65.5,
                "objects": [
                    { "class": "dog", "confidence": 0.7, "bbox": [0, 0, 3, 3] },
                    { "class": "person", "confidence": 0.9, "bbox": [4, 4, 8, 8], "color": "Green" }
                ]
            }
        ]
    })
}
