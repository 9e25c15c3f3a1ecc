//! Span definitions per operation.

/// Ingestion of one document.
#[macro_export]
macro_rules! ingestion_span {
    ($source:expr, $text_len:expr) => {
        tracing::info_span!("rag.ingestion", source = %$source, text_len = $text_len)
    };
}

/// One hybrid retrieval.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $top_k:expr) => {
        tracing::info_span!("rag.retrieval", query = %$query, top_k = $top_k)
    };
}

/// A full re-embedding pass.
#[macro_export]
macro_rules! reindex_span {
    ($batch_size:expr) => {
        tracing::info_span!("rag.reindex", batch_size = $batch_size)
    };
}

/// One facade request.
#[macro_export]
macro_rules! request_span {
    ($trace_id:expr, $operation:expr) => {
        tracing::info_span!("rag.request", trace_id = %$trace_id, operation = %$operation)
    };
}

pub mod names {
    pub const INGESTION: &str = "rag.ingestion";
    pub const RETRIEVAL: &str = "rag.retrieval";
    pub const REINDEX: &str = "rag.reindex";
    pub const REQUEST: &str = "rag.request";
}
