#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed intent suggestion: {0}")]
    MalformedSuggestion(String),
}
