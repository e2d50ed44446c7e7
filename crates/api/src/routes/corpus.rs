//! Route definitions for the detection corpus.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::corpus;
use crate::state::AppState;

/// Corpus routes mounted at `/corpus`.
///
/// ```text
/// GET    /  -> corpus_summary
/// PUT    /  -> load_corpus
/// DELETE /  -> clear_corpus
/// ```
pub fn router(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(corpus::corpus_summary)
                .put(corpus::load_corpus)
                .delete(corpus::clear_corpus),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
