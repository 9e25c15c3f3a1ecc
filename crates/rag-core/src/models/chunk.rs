use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chunker output. Offsets are char positions into the trimmed input and
/// describe the window before its own trim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub text: String,
    pub index: usize,
    pub start_char: usize,
    pub end_char: usize,
}

/// A chunk ready to persist: text plus its embedding, no identity yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChunk {
    pub text: String,
    pub chunk_index: usize,
    pub source: String,
    pub embedding: Vec<f32>,
}

/// A persisted chunk row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub document_id: String,
    pub text: String,
    pub chunk_index: usize,
    pub source: String,
    /// Omitted from serialized output when empty.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

/// A retrieval hit with its fused score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk_id: String,
    pub text: String,
    /// Fused RRF score, rounded to 6 decimals.
    pub score: f64,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl ScoredChunk {
    pub fn from_record(record: &ChunkRecord, score: f64) -> Self {
        Self {
            chunk_id: record.id.clone(),
            text: record.text.clone(),
            score,
            source: record.source.clone(),
            created_at: record.created_at,
        }
    }
}
