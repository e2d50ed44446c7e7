use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Frames in the currently loaded corpus.
    pub frames_loaded: usize,
    /// Configured query intent provider, or `null` for keywords only.
    pub intent_provider: Option<&'static str>,
}

/// GET /health -- returns service status and corpus size.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let frames_loaded = state.corpus().snapshot().await.frame_count();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        frames_loaded,
        intent_provider: state.engine.resolver().provider(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
