//! Embedding BLOB layout: little-endian f32, 4 bytes per component.

use rag_core::errors::{RagResult, StorageError};

pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Decode a blob that should hold `expected_dims` components.
pub fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> RagResult<Vec<f32>> {
    if expected_dims.checked_mul(4) != Some(bytes.len()) {
        return Err(StorageError::CorruptRow {
            details: format!(
                "embedding blob is {} bytes, expected 4 per component for {expected_dims} dims",
                bytes.len(),
            ),
        }
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_little_endian() {
        assert_eq!(f32_vec_to_bytes(&[1.0]), vec![0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn decode_restores_values() {
        let v = vec![0.25, -1.5, 3.0];
        assert_eq!(bytes_to_f32_vec(&f32_vec_to_bytes(&v), 3).unwrap(), v);
    }

    #[test]
    fn truncated_blob_is_corrupt() {
        assert!(bytes_to_f32_vec(&[0, 0, 0, 0, 0xff], 1).is_err());
        assert!(bytes_to_f32_vec(&[0; 8], 3).is_err());
    }

    #[test]
    fn oversized_width_is_corrupt_not_overflow() {
        assert!(bytes_to_f32_vec(&[0; 4], usize::MAX).is_err());
    }
}
