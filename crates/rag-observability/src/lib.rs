//! # rag-observability
//!
//! Structured logging for the pipeline: subscriber setup, span macros,
//! request events, and the per-request [`RequestContext`].

pub mod trace;
pub mod tracing_setup;

pub use trace::{generate_trace_id, RequestContext};
pub use tracing_setup::init_tracing;
