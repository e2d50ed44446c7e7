/// Errors from talking to an intent provider.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Intent provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered, but not with something we can read.
    #[error("Malformed intent response: {0}")]
    Malformed(String),
}
