/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("fused id {id} missing from candidate lookup")]
    MissingCandidate { id: String },
}
