//! Sliding-window chunker that prefers to cut after ". ".
//!
//! Offsets count chars, not bytes. Each window is at most `size` chars; when
//! the window does not reach the end of the text it is shortened to end just
//! after the last ". " inside it, provided that still moves the cursor
//! forward. The next window starts `overlap` chars before the previous end.

use rag_core::config::ChunkingConfig;
use rag_core::errors::{RagError, RagResult};
use rag_core::models::TextChunk;

/// Validated chunking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    size: usize,
    overlap: usize,
}

impl Chunker {
    /// Sizes are signed so that negative input can be rejected rather than
    /// wrapped.
    pub fn new(size: i64, overlap: i64) -> RagResult<Self> {
        if size <= 0 {
            return Err(RagError::invalid_argument("size must be positive"));
        }
        if overlap < 0 || overlap >= size {
            return Err(RagError::invalid_argument("overlap must be >= 0 and < size"));
        }
        Ok(Self {
            size: size as usize,
            overlap: overlap as usize,
        })
    }

    pub fn from_config(config: &ChunkingConfig) -> RagResult<Self> {
        Self::new(
            i64::try_from(config.chunk_size).unwrap_or(i64::MAX),
            i64::try_from(config.chunk_overlap).unwrap_or(i64::MAX),
        )
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        let chars: Vec<char> = text.trim().chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < len {
            let mut end = (start + self.size).min(len);

            if end < len {
                if let Some(b) = last_sentence_break(&chars, start, end) {
                    // The next start is b + 2 - overlap; it must pass `start`.
                    if b > start && b + 2 > start + self.overlap {
                        end = b + 2;
                    }
                }
            }

            let window: String = chars[start..end].iter().collect();
            let trimmed = window.trim();
            if !trimmed.is_empty() {
                chunks.push(TextChunk {
                    text: trimmed.to_string(),
                    index: chunks.len(),
                    start_char: start,
                    end_char: end,
                });
            }

            if end == len {
                break;
            }
            start = end - self.overlap;
        }

        chunks
    }
}

/// Split `text` with the given size and overlap.
pub fn chunk_text(text: &str, size: i64, overlap: i64) -> RagResult<Vec<TextChunk>> {
    Ok(Chunker::new(size, overlap)?.chunk(text))
}

/// Position of the last ". " lying entirely within `chars[start..end]`.
fn last_sentence_break(chars: &[char], start: usize, end: usize) -> Option<usize> {
    if end < start + 2 {
        return None;
    }
    (start..=end - 2)
        .rev()
        .find(|&i| chars[i] == '.' && chars[i + 1] == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[TextChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn empty_and_blank_text_give_nothing() {
        assert!(chunk_text("", 10, 2).unwrap().is_empty());
        assert!(chunk_text("   ", 10, 2).unwrap().is_empty());
        assert!(chunk_text("\n\t ", 10, 2).unwrap().is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("Hello world.", 100, 10).unwrap();
        assert_eq!(texts(&chunks), vec!["Hello world."]);
        assert_eq!(chunks[0].index, 0);
        assert_eq!((chunks[0].start_char, chunks[0].end_char), (0, 12));
    }

    #[test]
    fn breaks_after_sentence_when_cursor_can_advance() {
        let chunks = chunk_text("Hello world. This is a test.", 15, 5).unwrap();
        assert_eq!(
            texts(&chunks),
            vec!["Hello world.", "rld. This is a", "is a test."]
        );
        assert_eq!(chunks[0].end_char, 13);
        assert_eq!(chunks[1].start_char, 8);
        assert_eq!(chunks[1].end_char, 23);
        assert_eq!(chunks[2].start_char, 18);
        assert_eq!(chunks[2].end_char, 28);
    }

    #[test]
    fn boundary_at_window_start_is_ignored() {
        // The third window starts on the ". " at offset 6.
        let chunks = chunk_text("ab. cd. ef gh", 3, 0).unwrap();
        assert_eq!(texts(&chunks), vec!["ab.", "cd", ". e", "f g", "h"]);
    }

    #[test]
    fn hard_cut_without_boundary() {
        let chunks = chunk_text(&"a".repeat(25), 10, 0).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].text.len(), 5);
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let chunks = chunk_text("ééééé ééééé", 5, 0).unwrap();
        assert_eq!(texts(&chunks), vec!["ééééé", "éééé", "é"]);
        assert_eq!(chunks[1].start_char, 5);
        assert_eq!(chunks[1].end_char, 10);
    }

    #[test]
    fn whitespace_only_window_is_skipped_without_using_an_index() {
        let chunks = chunk_text("abc      def", 3, 0).unwrap();
        assert_eq!(texts(&chunks), vec!["abc", "def"]);
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let err = chunk_text("hello", 0, 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: size must be positive");
        assert!(chunk_text("hello", -5, 0).is_err());
        let err = chunk_text("hello", 10, 10).unwrap_err();
        assert!(err.to_string().contains("overlap must be >= 0 and < size"));
        assert!(chunk_text("hello", 10, -1).is_err());
    }

    #[test]
    fn from_config_uses_defaults() {
        let chunker = Chunker::from_config(&ChunkingConfig::default()).unwrap();
        assert_eq!((chunker.size(), chunker.overlap()), (512, 64));
    }

    #[test]
    fn dropping_overlap_reduces_chunk_count() {
        let text = "a".repeat(300);
        let with = chunk_text(&text, 100, 30).unwrap();
        let without = chunk_text(&text, 100, 0).unwrap();
        assert!(with.len() > without.len());
    }

    #[test]
    fn chunks_respect_size_on_words() {
        let text = "word ".repeat(200);
        for chunk in chunk_text(&text, 100, 20).unwrap() {
            assert!(chunk.text.chars().count() <= 100);
        }
    }
}
