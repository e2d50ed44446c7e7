use axum::routing::post;
use axum::Router;

use crate::handlers::query;
use crate::state::AppState;

/// Query routes mounted at `/query`.
///
/// ```text
/// POST /  -> submit_query
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(query::submit_query))
}
