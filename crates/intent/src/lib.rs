//! Intent interpretation for free-text frame queries.
//!
//! Provides the [`IntentService`] seam, two implementations (a remote HTTP
//! intent service and an in-process Gemini extractor), and the
//! [`IntentResolver`] that falls back to keyword extraction whenever a
//! service is missing, failing, or unhelpful.

pub mod error;
pub mod gemini;
pub mod http;
pub mod resolver;
pub mod service;

pub use error::IntentError;
pub use resolver::{IntentResolver, IntentSource, Interpretation};
pub use service::IntentService;
