//! Chat query endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// POST /api/v1/query
///
/// Interpret the query, match it against the current corpus, and describe
/// the result. Provider failures do not fail the request; they show up as
/// a `notice` on the reply. A query with no usable keywords, blank text
/// included, gets the clarification reply rather than an error.
pub async fn submit_query(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let reply = state.engine.submit(&input.query).await;
    Ok(Json(DataResponse { data: reply }))
}
