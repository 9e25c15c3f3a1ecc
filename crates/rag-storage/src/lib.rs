//! # rag-storage
//!
//! SQLite persistence layer: documents, chunks with their embeddings, the
//! vector and keyword search channels, and schema migrations.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;
pub use pool::ConnectionPool;

use rag_core::errors::{RagError, StorageError};

/// Wrap a SQLite failure message as a storage error.
pub fn to_storage_err(message: String) -> RagError {
    StorageError::SqliteError { message }.into()
}
