use std::collections::HashSet;

use proptest::prelude::*;
use rag_retrieval::search::rrf_fusion::{fuse, fuse_ranked};

fn id_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]{1,2}", 0..15)
}

proptest! {
    #[test]
    fn every_listed_id_scores_positive(lists in prop::collection::vec(id_list(), 0..4), k in 1u32..200) {
        let scores = fuse(&lists, k);
        let seen: HashSet<&String> = lists.iter().flatten().collect();
        prop_assert_eq!(scores.len(), seen.len());
        for id in seen {
            prop_assert!(scores[id] > 0.0);
        }
    }

    #[test]
    fn ranked_output_is_sorted(lists in prop::collection::vec(id_list(), 0..4), k in 1u32..200) {
        let ranked = fuse_ranked(&lists, k);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn fusion_is_commutative_over_lists(a in id_list(), b in id_list(), k in 1u32..200) {
        let ab = fuse(&[a.clone(), b.clone()], k);
        let ba = fuse(&[b, a], k);
        prop_assert_eq!(ab.len(), ba.len());
        for (id, score) in &ab {
            prop_assert!((score - ba[id]).abs() < 1e-12);
        }
    }

    #[test]
    fn unique_single_list_strictly_descends(n in 1usize..30, k in 0u32..100) {
        let list: Vec<String> = (0..n).map(|i| format!("id{i}")).collect();
        let scores = fuse(&[list.clone()], k);
        for pair in list.windows(2) {
            prop_assert!(scores[&pair[0]] > scores[&pair[1]]);
        }
    }
}
