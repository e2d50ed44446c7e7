//! Sherlock core domain logic.
//!
//! Turns free-text frame queries into structured predicates and evaluates
//! them against per-frame object detections. Everything in this crate is
//! synchronous and free of I/O so the API layer, the intent providers, and
//! tests can all share it.

pub mod detection;
pub mod error;
pub mod intent;
pub mod keywords;
pub mod matching;
pub mod session;
pub mod summary;
