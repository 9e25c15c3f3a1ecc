pub mod chunk_ops;
pub mod document_ops;
pub mod embedding_codec;
pub mod keyword_search;
pub mod vector_search;

use chrono::{DateTime, Utc};

use rag_core::errors::{RagResult, StorageError};

/// Timestamps are stored as RFC 3339 text.
pub(crate) fn parse_timestamp(raw: &str) -> RagResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRow {
                details: format!("bad timestamp {raw:?}: {e}"),
            }
            .into()
        })
}
