use async_trait::async_trait;

use crate::error::IntentError;

/// Something that can turn raw query text into a structured suggestion.
///
/// Implementations return the provider's JSON as-is. Normalization, and the
/// decision of what counts as empty, belongs to the resolver.
#[async_trait]
pub trait IntentService: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Ask the provider to interpret `query`.
    async fn suggest(&self, query: &str) -> Result<serde_json::Value, IntentError>;
}
