//! Deterministic SHA-256 expansion embedder.
//!
//! For counter `i = 0, 1, ...` the digest of `text || be_u32(i)` is read as
//! eight big-endian u32 words, each mapped linearly onto [-1, 1], until
//! `dimensions` values exist. The vector is then L2-normalized. Same text and
//! same width always give bit-identical output. Carries no semantics.
//!
//! `embed_f64` is the exact f64 result; the `IEmbeddingProvider` methods
//! return it rounded to f32, the width stored in the database.

use rag_core::errors::RagResult;
use rag_core::traits::IEmbeddingProvider;
use rayon::prelude::*;
use sha2::{Digest, Sha256};

pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// The normalized vector at full f64 precision. Bit-identical to any
    /// other implementation of the same expansion.
    pub fn embed_f64(&self, text: &str) -> Vec<f64> {
        let bytes = text.as_bytes();
        let mut values: Vec<f64> = Vec::with_capacity(self.dimensions);
        let mut counter: u32 = 0;

        while values.len() < self.dimensions {
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            hasher.update(counter.to_be_bytes());
            let digest = hasher.finalize();

            for word in digest.chunks_exact(4) {
                if values.len() == self.dimensions {
                    break;
                }
                let raw = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
                values.push(f64::from(raw) / f64::from(u32::MAX) * 2.0 - 1.0);
            }
            counter = counter.wrapping_add(1);
        }

        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }

        values
    }

    /// Storage precision: each component of `embed_f64` rounded to the
    /// nearest f32.
    fn hash_vector(&self, text: &str) -> Vec<f32> {
        self.embed_f64(text).into_iter().map(|v| v as f32).collect()
    }
}

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        Ok(self.hash_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> RagResult<Vec<Vec<f32>>> {
        Ok(texts.par_iter().map(|t| self.hash_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hash"
    }

    fn is_available(&self) -> bool {
        true
    }
}
