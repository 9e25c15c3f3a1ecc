//! Property tests: stored chunks come back intact, keyword hits contain
//! their terms, vector hits are sorted.

use proptest::prelude::*;

use rag_core::models::NewChunk;
use rag_core::traits::IChunkStorage;
use rag_storage::StorageEngine;

fn rows_from(texts: &[String], dims: usize) -> Vec<NewChunk> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| NewChunk {
            text: t.clone(),
            chunk_index: i,
            source: "prop".to_string(),
            embedding: (0..dims).map(|d| ((i * 31 + d * 7) % 13) as f32 - 6.0).collect(),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn stored_chunks_round_trip(texts in prop::collection::vec("[a-zA-Z ]{1,40}", 1..10)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let rows = rows_from(&texts, 8);
        let (doc, n) = engine.store_document_with_chunks("prop", "raw", &rows).unwrap();
        prop_assert_eq!(n, rows.len());

        let stored = engine.get_chunks(&doc.id).unwrap();
        prop_assert_eq!(stored.len(), rows.len());
        for (s, r) in stored.iter().zip(&rows) {
            prop_assert_eq!(&s.text, &r.text);
            prop_assert_eq!(&s.embedding, &r.embedding);
            prop_assert_eq!(s.chunk_index, r.chunk_index);
        }
    }

    #[test]
    fn keyword_hits_contain_every_term(
        texts in prop::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,5}", 1..12),
        terms in prop::collection::vec("[a-z]{1,2}", 1..3),
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        engine.store_document_with_chunks("prop", "raw", &rows_from(&texts, 4)).unwrap();

        let hits = engine.keyword_search(&terms, 100).unwrap();
        for hit in &hits {
            for term in &terms {
                prop_assert!(hit.text.to_lowercase().contains(term.as_str()));
            }
        }
        let expected = texts
            .iter()
            .filter(|t| terms.iter().all(|term| t.contains(term.as_str())))
            .count();
        prop_assert_eq!(hits.len(), expected);
    }

    #[test]
    fn vector_hits_are_sorted_descending(texts in prop::collection::vec("[a-z]{1,10}", 1..15)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        engine.store_document_with_chunks("prop", "raw", &rows_from(&texts, 6)).unwrap();

        let hits = engine.vector_search(&[1.0, -1.0, 0.5, 0.0, 2.0, -0.5], 100).unwrap();
        prop_assert_eq!(hits.len(), texts.len());
        for w in hits.windows(2) {
            prop_assert!(w[0].1 >= w[1].1);
        }
    }
}
