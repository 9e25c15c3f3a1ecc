//! # rag-ingestion
//!
//! Text → chunks → vectors → storage.
//!
//! - [`chunker`]: overlapping, sentence-aware windows over the input.
//! - [`IngestionPipeline`]: chunk, embed in one batch, persist atomically.
//! - [`Reindexer`]: re-embed every stored chunk with the current embedder.

pub mod chunker;
pub mod pipeline;
pub mod reindex;

pub use chunker::{chunk_text, Chunker};
pub use pipeline::IngestionPipeline;
pub use reindex::Reindexer;
