mod chunk_storage;
mod embedding;
mod retriever;

pub use chunk_storage::IChunkStorage;
pub use embedding::IEmbeddingProvider;
pub use retriever::IRetriever;
