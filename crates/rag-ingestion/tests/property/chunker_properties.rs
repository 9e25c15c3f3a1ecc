use proptest::prelude::*;
use rag_ingestion::chunk_text;

proptest! {
    #[test]
    fn chunks_fit_size_and_are_sequential(
        text in "[a-z .]{0,400}",
        size in 1i64..80,
        overlap_frac in 0.0f64..1.0,
    ) {
        let overlap = ((size as f64) * overlap_frac) as i64;
        prop_assume!(overlap < size);
        let chunks = chunk_text(&text, size, overlap).unwrap();

        for (i, c) in chunks.iter().enumerate() {
            prop_assert_eq!(c.index, i);
            prop_assert!(!c.text.is_empty());
            prop_assert!(c.text.chars().count() <= size as usize);
            prop_assert!(c.end_char - c.start_char <= size as usize);
        }
    }

    #[test]
    fn cursor_strictly_advances(
        text in "[a-z. ]{1,300}",
        size in 2i64..40,
        overlap in 0i64..39,
    ) {
        prop_assume!(overlap < size);
        let chunks = chunk_text(&text, size, overlap).unwrap();
        for w in chunks.windows(2) {
            prop_assert!(w[1].start_char > w[0].start_char);
        }
    }

    #[test]
    fn chunk_text_is_a_substring_of_trimmed_input(text in "[a-zA-Z .,]{0,200}") {
        let trimmed = text.trim();
        for c in chunk_text(&text, 37, 7).unwrap() {
            prop_assert!(trimmed.contains(&c.text));
        }
    }

    #[test]
    fn last_chunk_reaches_the_end(text in "[a-z]{1,50}( [a-z]{1,50}){0,10}") {
        let len = text.trim().chars().count();
        let chunks = chunk_text(&text, 25, 5).unwrap();
        prop_assert_eq!(chunks.last().map(|c| c.end_char), Some(len));
    }
}
