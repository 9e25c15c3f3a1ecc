//! Structured log events for request boundaries and pipeline milestones.

pub fn request_started(trace_id: &str, operation: &str) {
    tracing::info!(
        event = "request_started",
        trace_id = %trace_id,
        operation = %operation,
        "request started"
    );
}

pub fn request_completed(trace_id: &str, operation: &str, duration_ms: u64) {
    tracing::info!(
        event = "request_completed",
        trace_id = %trace_id,
        operation = %operation,
        duration_ms = duration_ms,
        "request completed"
    );
}

pub fn request_failed(trace_id: &str, operation: &str, duration_ms: u64, error: &str) {
    tracing::warn!(
        event = "request_failed",
        trace_id = %trace_id,
        operation = %operation,
        duration_ms = duration_ms,
        error = %error,
        "request failed"
    );
}

pub fn document_ingested(document_id: &str, source: &str, chunks: usize) {
    tracing::info!(
        event = "document_ingested",
        document_id = %document_id,
        source = %source,
        chunks = chunks,
        "document ingested"
    );
}

pub fn reindex_batch(batch: usize, updated: usize, total: usize) {
    tracing::info!(
        event = "reindex_batch",
        batch = batch,
        updated = updated,
        total = total,
        "reindex progress"
    );
}
