pub mod corpus;
pub mod health;
pub mod intent;
pub mod query;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /corpus                 load (PUT), inspect (GET), clear (DELETE)
/// /query                  interpret and match a chat query (POST)
/// /intent                 hosted intent extraction (POST)
/// ```
///
/// `max_corpus_bytes` caps the body size of corpus uploads only.
pub fn api_routes(max_corpus_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/corpus", corpus::router(max_corpus_bytes))
        .nest("/query", query::router())
        .nest("/intent", intent::router())
}
