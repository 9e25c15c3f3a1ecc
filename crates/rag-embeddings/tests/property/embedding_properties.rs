use rag_core::traits::IEmbeddingProvider;
use rag_embeddings::HashEmbedder;
use proptest::prelude::*;

proptest! {
    #[test]
    fn length_equals_dimensions(s in ".{0,200}", dims in 1usize..600) {
        let v = HashEmbedder::new(dims).embed(&s).unwrap();
        prop_assert_eq!(v.len(), dims);
    }

    #[test]
    fn unit_norm(s in ".{0,200}", dims in 1usize..600) {
        let v = HashEmbedder::new(dims).embed(&s).unwrap();
        let n = v.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();
        prop_assert!((n - 1.0).abs() < 1e-6, "norm {}", n);
    }

    #[test]
    fn deterministic(s in ".{0,200}") {
        let p = HashEmbedder::new(96);
        prop_assert_eq!(p.embed(&s).unwrap(), p.embed(&s).unwrap());
    }

    #[test]
    fn distinct_texts_distinct_vectors(a in ".{0,64}", b in ".{0,64}") {
        prop_assume!(a != b);
        let p = HashEmbedder::new(32);
        prop_assert_ne!(p.embed(&a).unwrap(), p.embed(&b).unwrap());
    }

    #[test]
    fn batch_equals_elementwise(texts in prop::collection::vec(".{0,50}", 0..12)) {
        let p = HashEmbedder::new(48);
        let batch = p.embed_batch(&texts).unwrap();
        prop_assert_eq!(batch.len(), texts.len());
        for (t, v) in texts.iter().zip(&batch) {
            prop_assert_eq!(v, &p.embed(t).unwrap());
        }
    }
}
