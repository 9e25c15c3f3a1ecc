//! Compose an answer string from retrieved passages.

use rag_core::models::ScoredChunk;

/// Returned when retrieval found nothing.
pub const NO_CONTEXT_ANSWER: &str = "No relevant context found for your question.";

const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Header, passages in rank order, and a footer naming the question a
/// language model would be asked.
pub fn compose_answer(question: &str, passages: &[ScoredChunk]) -> String {
    if passages.is_empty() {
        return NO_CONTEXT_ANSWER.to_string();
    }

    let context = passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(PASSAGE_SEPARATOR);
    format!(
        "Based on {} retrieved passage(s):\n\n{context}\n\n\
         (In production, an LLM would synthesise an answer to: \"{question}\")",
        passages.len()
    )
}
