//! HTTP surface for Sherlock frame search.
//!
//! Exposes corpus upload, chat-style queries, and the hosted intent
//! extractor. The binary in `main.rs` wires these into a server.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
