//! Hosted intent extraction.
//!
//! Answers with a bare `{targets, colors, pairs}` object so that another
//! Sherlock instance can use this endpoint as its `INTENT_SERVICE_URL`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::query::QueryRequest;
use crate::state::AppState;

/// POST /api/v1/intent
pub async fn extract_intent(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let interpretation = state.extractor.interpret(&input.query).await;

    tracing::debug!(
        source = ?interpretation.source,
        targets = interpretation.intent.targets.len(),
        pairs = interpretation.intent.pairs.len(),
        "Hosted intent extracted",
    );

    Ok(Json(interpretation.intent))
}
