//! # rag-embeddings
//!
//! Text-to-vector embedding for the RAG pipeline.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine
//! ├── provider (selected by `embedding.provider`)
//! │   └── HashEmbedder (SHA-256 expansion, L2-normalized)
//! └── L1MemoryCache (moka, keyed by blake3 of the text)
//! ```

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::L1MemoryCache;
pub use engine::{validate_dimensions, EmbeddingEngine};
pub use providers::{create_provider, HashEmbedder};
