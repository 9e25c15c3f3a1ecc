//! # rag-runtime
//!
//! The service facade. [`RagRuntime`] owns storage, the embedding engine and
//! the config, and exposes the API-level operations as plain request and
//! response records. Blocking work runs on the calling thread; the
//! `*_with_timeout` variants move it onto tokio's blocking pool under a
//! deadline.

pub mod runtime;
pub mod samples;
pub mod validation;

pub use runtime::{RagRuntime, RuntimeOptions};
pub use samples::{Sample, SAMPLES};
