//! Trace ids and the per-request context threaded through the engines.

use std::time::{Duration, Instant};

use rag_core::constants::TRACE_ID_LEN;
use rag_core::errors::{RagError, RagResult};

/// 16 lowercase hex chars taken from a fresh UUIDv4.
pub fn generate_trace_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(TRACE_ID_LEN);
    id
}

/// Trace id, start time, and optional deadline of one request. Passed
/// explicitly; nothing here is global.
#[derive(Debug, Clone)]
pub struct RequestContext {
    trace_id: String,
    operation: String,
    started: Instant,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            trace_id: generate_trace_id(),
            operation: operation.into(),
            started: Instant::now(),
            deadline: None,
        }
    }

    /// Reuse a caller-supplied trace id.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Deadline `timeout` after the context was created. A timeout too large
    /// to represent means no deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = self.started.checked_add(timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Time left before the deadline. `None` without a deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// `DeadlineExceeded` once the deadline has passed. `stage` names the
    /// step about to run.
    pub fn check_deadline(&self, stage: &str) -> RagResult<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(RagError::DeadlineExceeded {
                operation: format!("{}/{stage}", self.operation),
                elapsed_ms: self.elapsed_ms(),
            }),
            _ => Ok(()),
        }
    }

    /// The `rag.request` span for this context.
    pub fn span(&self) -> tracing::Span {
        crate::request_span!(self.trace_id, self.operation)
    }
}
