//! Error types. One enum per subsystem, folded into [`RagError`].

mod embedding_error;
mod retrieval_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

use serde::{Deserialize, Serialize};

pub type RagResult<T> = Result<T, RagError>;

/// Top-level error for every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("encoding error: {reason}")]
    EncodingError { reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("deadline exceeded during {operation} after {elapsed_ms}ms")]
    DeadlineExceeded { operation: String, elapsed_ms: u64 },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RagError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Stable classification for callers that map errors to responses.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::EncodingError { .. } => ErrorKind::EncodingError,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            Self::StorageError(_) => ErrorKind::StorageUnavailable,
            Self::EmbeddingError(_) => ErrorKind::EmbeddingFailed,
            Self::RetrievalError(_) => ErrorKind::Internal,
            Self::SerializationError(_) => ErrorKind::Serialization,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The user-visible form: kind and message, nothing else.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Coarse error classes exposed to the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    EncodingError,
    StorageUnavailable,
    NotFound,
    EmbeddingFailed,
    DeadlineExceeded,
    Config,
    Serialization,
    Internal,
}

/// Structured failure handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<std::str::Utf8Error> for RagError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::EncodingError {
            reason: e.to_string(),
        }
    }
}

impl From<std::string::FromUtf8Error> for RagError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::EncodingError {
            reason: e.to_string(),
        }
    }
}
