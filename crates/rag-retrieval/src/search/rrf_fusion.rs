//! Reciprocal Rank Fusion: score = Σ 1/(k + rank + 1), rank zero-based.
//!
//! Combines multiple ranked lists into a single fused ranking without
//! requiring score normalization across different retrieval methods.

use std::collections::HashMap;

/// Fuse ranked ID lists (best first) into a map of ID → fused score.
///
/// `k` is the smoothing constant (default 60). Higher k reduces the
/// influence of high-ranking items from any single list. An ID that appears
/// twice in one list is counted at both positions.
pub fn fuse(ranked_lists: &[Vec<String>], k: u32) -> HashMap<String, f64> {
    let mut scores: HashMap<String, f64> = HashMap::new();
    for list in ranked_lists {
        for (rank, id) in list.iter().enumerate() {
            *scores.entry(id.clone()).or_default() += contribution(k, rank);
        }
    }
    scores
}

/// Same scores as [`fuse`], as `(id, score)` pairs sorted by score
/// descending. Equal scores keep the order in which the IDs were first seen.
pub fn fuse_ranked(ranked_lists: &[Vec<String>], k: u32) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut scores: HashMap<String, f64> = HashMap::new();
    for list in ranked_lists {
        for (rank, id) in list.iter().enumerate() {
            let slot = scores.entry(id.clone()).or_insert_with(|| {
                order.push(id.clone());
                0.0
            });
            *slot += contribution(k, rank);
        }
    }

    let mut fused: Vec<(String, f64)> = order
        .into_iter()
        .map(|id| {
            let score = scores.get(&id).copied().unwrap_or_default();
            (id, score)
        })
        .collect();

    // Stable sort keeps first-seen order among ties.
    fused.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    fused
}

#[inline]
fn contribution(k: u32, rank: usize) -> f64 {
    1.0 / (f64::from(k) + rank as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_rank_scores_one_over_k_plus_one() {
        let scores = fuse(&[list(&["a"])], 60);
        assert!((scores["a"] - 1.0 / 61.0).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_first_appearance() {
        // "x" and "y" each hold rank 0 in one list.
        let fused = fuse_ranked(&[list(&["x"]), list(&["y"])], 60);
        assert_eq!(fused[0].0, "x");
        assert_eq!(fused[1].0, "y");
        assert_eq!(fused[0].1, fused[1].1);
    }

    #[test]
    fn ranked_matches_map() {
        let lists = [list(&["a", "b", "c"]), list(&["c", "a", "d"])];
        let map = fuse(&lists, 60);
        let ranked = fuse_ranked(&lists, 60);
        assert_eq!(ranked.len(), map.len());
        for (id, score) in &ranked {
            assert_eq!(map[id], *score);
        }
    }
}
