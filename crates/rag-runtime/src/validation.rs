//! Request validation shared by the facade operations.

use rag_core::config::RetrievalConfig;
use rag_core::errors::{RagError, RagResult};

/// `InvalidArgument` when `value` is empty.
pub fn require_non_empty(field: &str, value: &str) -> RagResult<()> {
    if value.is_empty() {
        return Err(RagError::invalid_argument(format!("{field} must not be empty")));
    }
    Ok(())
}

/// The requested `top_k`, or the configured default, checked against
/// `1..=max_top_k`.
pub fn resolve_top_k(requested: Option<usize>, config: &RetrievalConfig) -> RagResult<usize> {
    let top_k = requested.unwrap_or(config.default_top_k);
    if top_k == 0 || top_k > config.max_top_k {
        return Err(RagError::invalid_argument(format!(
            "top_k must be within 1..={}, got {top_k}",
            config.max_top_k
        )));
    }
    Ok(top_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_core::errors::ErrorKind;

    #[test]
    fn empty_is_rejected_whitespace_is_not() {
        assert_eq!(
            require_non_empty("q", "").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(require_non_empty("q", " ").is_ok());
    }

    #[test]
    fn top_k_bounds() {
        let cfg = RetrievalConfig::default();
        assert_eq!(resolve_top_k(None, &cfg).unwrap(), 5);
        assert_eq!(resolve_top_k(Some(1), &cfg).unwrap(), 1);
        assert_eq!(resolve_top_k(Some(50), &cfg).unwrap(), 50);
        assert!(resolve_top_k(Some(0), &cfg).is_err());
        assert!(resolve_top_k(Some(51), &cfg).is_err());
    }
}
