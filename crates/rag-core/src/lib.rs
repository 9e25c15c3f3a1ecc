//! # rag-core
//!
//! Foundation crate for the hybrid RAG pipeline.
//! Defines the shared models, the collaborator traits (embedding provider,
//! chunk storage, retriever), errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RagConfig;
pub use errors::{ErrorKind, ErrorReport, RagError, RagResult};
pub use models::{ChunkRecord, Document, NewChunk, ScoredChunk, TextChunk};
