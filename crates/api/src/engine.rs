//! Query pipeline: interpret, match, summarize.
//!
//! The corpus is read *after* interpretation finishes, so a query always
//! matches against whatever corpus is current at evaluation time. An upload
//! that lands while the intent provider is still thinking is therefore
//! visible to that query.

use std::sync::Arc;

use serde::Serialize;
use sherlock_core::intent::QueryIntent;
use sherlock_core::summary::{summarize, FrameMatch, UNCLEAR_QUERY_MESSAGE};
use sherlock_intent::{IntentResolver, IntentSource};

use crate::session::CorpusStore;

/// Everything the client needs to render one chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReply {
    pub intent: QueryIntent,
    pub source: IntentSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub message: String,
    pub matches: Vec<FrameMatch>,
}

pub struct QueryEngine {
    resolver: IntentResolver,
    corpus: Arc<CorpusStore>,
}

impl QueryEngine {
    pub fn new(resolver: IntentResolver, corpus: Arc<CorpusStore>) -> Self {
        Self { resolver, corpus }
    }

    pub fn corpus(&self) -> &Arc<CorpusStore> {
        &self.corpus
    }

    pub fn resolver(&self) -> &IntentResolver {
        &self.resolver
    }

    /// Run one query end to end. Never fails; provider problems surface as
    /// a notice on the reply.
    pub async fn submit(&self, text: &str) -> QueryReply {
        let interpretation = self.resolver.interpret(text).await;

        if interpretation.intent.is_empty() {
            tracing::debug!("Query produced no search terms");
            return QueryReply {
                intent: interpretation.intent,
                source: interpretation.source,
                notice: interpretation.notice,
                message: UNCLEAR_QUERY_MESSAGE.to_string(),
                matches: Vec::new(),
            };
        }

        let session = self.corpus.snapshot().await;
        let matches = session.find(&interpretation.intent);
        let message = summarize(&matches, &interpretation.intent);

        tracing::info!(
            source = ?interpretation.source,
            mode = ?interpretation.intent.mode(),
            frames_searched = session.frame_count(),
            matches = matches.len(),
            "Query evaluated",
        );

        QueryReply {
            intent: interpretation.intent,
            source: interpretation.source,
            notice: interpretation.notice,
            message,
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use sherlock_core::detection::{Detection, FrameRecord};
    use sherlock_core::summary::FALLBACK_NOTICE;
    use sherlock_intent::{IntentError, IntentService};
    use tokio::sync::Notify;

    use super::*;

    fn corpus() -> Vec<FrameRecord> {
        vec![
            FrameRecord::new(0, 0.0)
                .with_object(Detection::new("car", 0.9).with_color("red"))
                .with_object(Detection::new("truck", 0.9).with_color("blue")),
            FrameRecord::new(30, 1.0).with_object(Detection::new("car", 0.9).with_color("red")),
            FrameRecord::new(60, 2.0).with_object(Detection::new("dog", 0.7)),
        ]
    }

    async fn engine_with(resolver: IntentResolver) -> QueryEngine {
        let store = Arc::new(CorpusStore::new(0.6));
        store.replace(corpus()).await.unwrap();
        QueryEngine::new(resolver, store)
    }

    struct FixedService(fn() -> Result<Value, IntentError>);

    #[async_trait]
    impl IntentService for FixedService {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn suggest(&self, _query: &str) -> Result<Value, IntentError> {
            (self.0)()
        }
    }

    #[tokio::test]
    async fn pair_query_requires_both_pairs() {
        let service = FixedService(|| {
            Ok(json!({
                "pairs": [
                    { "object": "car", "color": "red" },
                    { "object": "truck", "color": "blue" }
                ]
            }))
        });
        let engine = engine_with(IntentResolver::new(Arc::new(service))).await;

        let reply = engine.submit("red car next to a blue truck").await;

        assert_eq!(reply.source, IntentSource::Service);
        assert_eq!(reply.matches.len(), 1);
        assert_eq!(reply.matches[0].frame_index, 0);
        assert_eq!(
            reply.message,
            "Found 1 frame where \"red car\" and \"blue truck\" is visible."
        );
    }

    #[tokio::test]
    async fn keyword_query_without_provider() {
        let engine = engine_with(IntentResolver::keywords_only()).await;

        let reply = engine.submit("any dogs or dog").await;

        assert_eq!(reply.notice, None);
        assert_eq!(reply.matches.len(), 1);
        assert_eq!(reply.matches[0].timestamp_formatted, "0:02");
    }

    #[tokio::test]
    async fn provider_failure_adds_notice() {
        let service = FixedService(|| Err(IntentError::Malformed("garbage".into())));
        let engine = engine_with(IntentResolver::new(Arc::new(service))).await;

        let reply = engine.submit("red car").await;

        assert_eq!(reply.notice.as_deref(), Some(FALLBACK_NOTICE));
        assert_eq!(reply.source, IntentSource::Keywords);
        assert_eq!(reply.matches.len(), 2);
    }

    #[tokio::test]
    async fn unclear_query_skips_matching() {
        let engine = engine_with(IntentResolver::keywords_only()).await;

        let reply = engine.submit("show me the").await;

        assert!(reply.intent.is_empty());
        assert!(reply.matches.is_empty());
        assert_eq!(reply.message, UNCLEAR_QUERY_MESSAGE);
    }

    /// Holds its reply until released, so the corpus can change mid-query.
    struct GatedService {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl IntentService for GatedService {
        fn name(&self) -> &'static str {
            "gated"
        }

        async fn suggest(&self, _query: &str) -> Result<Value, IntentError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(json!({ "targets": ["horse"] }))
        }
    }

    #[tokio::test]
    async fn corpus_is_read_at_evaluation_time() {
        let gate = Arc::new(GatedService {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let engine = Arc::new(engine_with(IntentResolver::new(gate.clone())).await);

        let task = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.submit("horse").await })
        };

        gate.entered.notified().await;
        engine
            .corpus()
            .replace(vec![
                FrameRecord::new(90, 3.0).with_object(Detection::new("horse", 0.95))
            ])
            .await
            .unwrap();
        gate.release.notify_one();

        let reply = task.await.unwrap();
        assert_eq!(reply.matches.len(), 1);
        assert_eq!(reply.matches[0].frame_index, 90);
    }
}
