//! Keyword channel: every term must appear as a case-insensitive substring.
//!
//! Matching goes through `contains_folded`, so case folding covers all of
//! Unicode and terms never act as patterns.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use rag_core::errors::RagResult;
use rag_core::models::ChunkRecord;

use super::chunk_ops::{collect_records, RawChunk, CHUNK_COLUMNS};
use crate::pool::functions::CONTAINS_FOLDED;
use crate::to_storage_err;

/// Chunks whose text contains all `terms`, in insertion order.
/// An empty term list matches nothing.
pub fn search_keywords(
    conn: &Connection,
    terms: &[String],
    limit: usize,
) -> RagResult<Vec<ChunkRecord>> {
    if terms.is_empty() || limit == 0 {
        return Ok(vec![]);
    }

    let clauses = (1..=terms.len())
        .map(|i| format!("{CONTAINS_FOLDED}(text, ?{i})"))
        .collect::<Vec<_>>()
        .join(" AND ");
    let sql = format!(
        "SELECT {CHUNK_COLUMNS} FROM chunks WHERE {clauses} ORDER BY rowid LIMIT ?{}",
        terms.len() + 1
    );

    let mut values: Vec<Value> = terms
        .iter()
        .map(|t| Value::Text(t.to_lowercase()))
        .collect();
    values.push(Value::Integer(limit as i64));

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(values), RawChunk::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect_records(rows)
}
