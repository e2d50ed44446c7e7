use axum::routing::post;
use axum::Router;

use crate::handlers::intent;
use crate::state::AppState;

/// Hosted intent extraction mounted at `/intent`.
///
/// ```text
/// POST /  -> extract_intent
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(intent::extract_intent))
}
