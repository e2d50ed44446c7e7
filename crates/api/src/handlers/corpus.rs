//! Handlers for loading, inspecting, and clearing the detection corpus.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use sherlock_core::detection::FrameRecord;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Detector output as uploaded by the client.
#[derive(Debug, Deserialize)]
pub struct CorpusUpload {
    pub results: Vec<FrameRecord>,
}

#[derive(Debug, Serialize)]
pub struct CorpusSummary {
    pub frames: usize,
    pub detections: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

/// PUT /api/v1/corpus
///
/// Replace the loaded corpus with the uploaded detector results.
pub async fn load_corpus(
    State(state): State<AppState>,
    body: Result<Json<CorpusUpload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(upload) = body?;
    let session = state.corpus().replace(upload.results).await?;

    Ok(Json(DataResponse {
        data: CorpusSummary {
            frames: session.frame_count(),
            detections: session.detection_count(),
            confidence_threshold: None,
        },
    }))
}

/// GET /api/v1/corpus
pub async fn corpus_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.corpus().snapshot().await;

    Ok(Json(DataResponse {
        data: CorpusSummary {
            frames: session.frame_count(),
            detections: session.detection_count(),
            confidence_threshold: Some(session.confidence_threshold()),
        },
    }))
}

/// DELETE /api/v1/corpus
pub async fn clear_corpus(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.corpus().clear().await;
    Ok(StatusCode::NO_CONTENT)
}
