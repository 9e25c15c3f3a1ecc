//! Insert, read, page through, and re-embed chunk rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use rag_core::errors::{RagResult, StorageError};
use rag_core::models::{ChunkRecord, NewChunk};

use super::embedding_codec::{bytes_to_f32_vec, f32_vec_to_bytes};
use super::parse_timestamp;
use crate::to_storage_err;

/// Column list every chunk read selects, in `RawChunk::from_row` order.
pub(crate) const CHUNK_COLUMNS: &str =
    "id, document_id, text, chunk_index, source, embedding, dimensions, created_at";

/// A chunk row before timestamp parsing and blob decoding.
pub(crate) struct RawChunk {
    id: String,
    document_id: String,
    text: String,
    chunk_index: i64,
    source: String,
    embedding: Vec<u8>,
    dimensions: i64,
    created_at: String,
}

impl RawChunk {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            document_id: row.get(1)?,
            text: row.get(2)?,
            chunk_index: row.get(3)?,
            source: row.get(4)?,
            embedding: row.get(5)?,
            dimensions: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    pub(crate) fn into_record(self) -> RagResult<ChunkRecord> {
        let dimensions = non_negative(self.dimensions, "dimensions", &self.id)?;
        let chunk_index = non_negative(self.chunk_index, "chunk_index", &self.id)?;
        Ok(ChunkRecord {
            embedding: bytes_to_f32_vec(&self.embedding, dimensions)?,
            created_at: parse_timestamp(&self.created_at)?,
            id: self.id,
            document_id: self.document_id,
            text: self.text,
            chunk_index,
            source: self.source,
        })
    }
}

/// `CorruptRow` when a stored count does not fit `usize`.
fn non_negative(value: i64, column: &str, chunk_id: &str) -> RagResult<usize> {
    usize::try_from(value).map_err(|_| {
        StorageError::CorruptRow {
            details: format!("chunk {chunk_id}: {column} is {value}"),
        }
        .into()
    })
}

/// Insert chunk rows for `document_id`, all stamped `created_at`.
/// Runs on whatever connection or transaction it is handed.
pub fn insert_chunks(
    conn: &Connection,
    document_id: &str,
    rows: &[NewChunk],
    created_at: DateTime<Utc>,
) -> RagResult<usize> {
    let stamp = created_at.to_rfc3339();
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO chunks (
                id, document_id, text, chunk_index, source, embedding, dimensions,
                created_at, embedded_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for row in rows {
        let id = uuid::Uuid::new_v4().simple().to_string();
        stmt.execute(params![
            id,
            document_id,
            row.text,
            row.chunk_index as i64,
            row.source,
            f32_vec_to_bytes(&row.embedding),
            row.embedding.len() as i64,
            stamp,
        ])
        .map_err(|e| to_storage_err(format!("insert_chunks: {e}")))?;
    }
    Ok(rows.len())
}

pub fn get_chunk(conn: &Connection, id: &str) -> RagResult<Option<ChunkRecord>> {
    let raw = conn
        .query_row(
            &format!("SELECT {CHUNK_COLUMNS} FROM chunks WHERE id = ?1"),
            params![id],
            RawChunk::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawChunk::into_record).transpose()
}

/// Chunks of one document by `chunk_index`.
pub fn get_chunks(conn: &Connection, document_id: &str) -> RagResult<Vec<ChunkRecord>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CHUNK_COLUMNS} FROM chunks WHERE document_id = ?1 ORDER BY chunk_index"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![document_id], RawChunk::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_records(rows)
}

/// A page of chunks in insertion order.
pub fn list_chunks(conn: &Connection, offset: usize, limit: usize) -> RagResult<Vec<ChunkRecord>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {CHUNK_COLUMNS} FROM chunks ORDER BY rowid LIMIT ?1 OFFSET ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64, offset as i64], RawChunk::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_records(rows)
}

pub fn count_chunks(conn: &Connection) -> RagResult<usize> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}

/// Replace the embedding (and its width) of each listed chunk in one
/// transaction. Unknown ids are skipped. Returns rows changed.
pub fn update_embeddings(conn: &Connection, updates: &[(String, Vec<f32>)]) -> RagResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("update_embeddings begin: {e}")))?;
    let now = Utc::now().to_rfc3339();
    let mut changed = 0;
    {
        let mut stmt = tx
            .prepare_cached(
                "UPDATE chunks SET embedding = ?1, dimensions = ?2, embedded_at = ?3
                 WHERE id = ?4",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for (id, embedding) in updates {
            changed += stmt
                .execute(params![
                    f32_vec_to_bytes(embedding),
                    embedding.len() as i64,
                    now,
                    id
                ])
                .map_err(|e| to_storage_err(format!("update_embeddings: {e}")))?;
        }
    }
    tx.commit()
        .map_err(|e| to_storage_err(format!("update_embeddings commit: {e}")))?;
    Ok(changed)
}

pub(crate) fn collect_records<I>(rows: I) -> RagResult<Vec<ChunkRecord>>
where
    I: Iterator<Item = rusqlite::Result<RawChunk>>,
{
    rows.map(|row| {
        row.map_err(|e| to_storage_err(e.to_string()))
            .and_then(RawChunk::into_record)
    })
    .collect()
}
