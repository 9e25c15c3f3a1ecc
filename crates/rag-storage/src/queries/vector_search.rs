//! Brute-force cosine similarity scan over stored chunk embeddings.

use rusqlite::Connection;

use rag_core::errors::RagResult;
use rag_core::models::ChunkRecord;

use super::chunk_ops::get_chunk;
use super::embedding_codec::bytes_to_f32_vec;
use crate::to_storage_err;

/// Chunks ordered by cosine similarity to `query_embedding`, most similar
/// first, paired with the similarity. Rows of a different width are skipped.
/// Equal similarities keep insertion order.
pub fn search_vector(
    conn: &Connection,
    query_embedding: &[f32],
    limit: usize,
) -> RagResult<Vec<(ChunkRecord, f64)>> {
    if limit == 0 {
        return Ok(vec![]);
    }

    let mut stmt = conn
        .prepare("SELECT id, embedding, dimensions FROM chunks ORDER BY rowid")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let query_len = query_embedding.len();
    let mut scored: Vec<(String, f64)> = Vec::new();
    for row in rows {
        let (chunk_id, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if usize::try_from(dims).ok() != Some(query_len) {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, query_len)?;
        scored.push((chunk_id, cosine_similarity(query_embedding, &stored)));
    }

    // Stable sort keeps insertion order among ties.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    let mut results = Vec::with_capacity(scored.len());
    for (chunk_id, sim) in scored {
        if let Some(chunk) = get_chunk(conn, &chunk_id)? {
            results.push((chunk, sim));
        }
    }
    Ok(results)
}

/// Cosine similarity in f64. Zero if either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_a = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = [0.6, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_vectors_have_similarity_minus_one() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
