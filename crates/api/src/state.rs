use std::sync::Arc;

use sherlock_intent::IntentResolver;

use crate::config::ServerConfig;
use crate::engine::QueryEngine;
use crate::session::CorpusStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Chat query pipeline (owns the corpus store).
    pub engine: Arc<QueryEngine>,
    /// Resolver behind the hosted `/intent` endpoint.
    pub extractor: IntentResolver,
}

impl AppState {
    pub fn new(config: ServerConfig, query_resolver: IntentResolver, extractor: IntentResolver) -> Self {
        let corpus = Arc::new(CorpusStore::new(config.confidence_threshold));
        Self {
            config: Arc::new(config),
            engine: Arc::new(QueryEngine::new(query_resolver, corpus)),
            extractor,
        }
    }

    pub fn corpus(&self) -> &Arc<CorpusStore> {
        self.engine.corpus()
    }
}
