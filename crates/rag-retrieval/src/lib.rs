//! # rag-retrieval
//!
//! The query side of the pipeline. Two ranked candidate channels, one fused
//! ranking, then an extractive answer over the winners.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalEngine (IRetriever)
//! ├── query embedding (IEmbeddingProvider)
//! ├── HybridSearcher
//! │   ├── Vector Search (cosine similarity)    ┐ rayon::join
//! │   ├── Keyword Search (AND of folded terms) ┘
//! │   └── RRF Fusion (reciprocal rank)
//! └── generation
//!     └── compose_answer (passage concatenation)
//! ```

pub mod engine;
pub mod generation;
pub mod search;

pub use engine::RetrievalEngine;
pub use generation::compose_answer;
pub use search::HybridSearcher;
