//! RagRuntime: owns the engines and runs every facade operation inside a
//! traced request context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rag_core::config::RagConfig;
use rag_core::constants::DEFAULT_UPLOAD_SOURCE;
use rag_core::errors::{RagError, RagResult};
use rag_core::models::{
    AnswerRequest, AnswerResponse, HealthStatus, IngestResponse, IngestTextRequest,
    ReindexReport, SearchRequest, SearchResponse,
};
use rag_core::traits::{IChunkStorage, IEmbeddingProvider};
use rag_embeddings::EmbeddingEngine;
use rag_ingestion::{IngestionPipeline, Reindexer};
use rag_observability::tracing_setup::events;
use rag_observability::RequestContext;
use rag_retrieval::{compose_answer, RetrievalEngine};
use rag_storage::StorageEngine;
use tracing::info;

use crate::samples::{Sample, SAMPLES};
use crate::validation::{require_non_empty, resolve_top_k};

/// Options for building the runtime.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Overrides `config.storage.db_path`. `":memory:"` gives an in-memory
    /// store.
    pub db_path: Option<PathBuf>,
    /// Configuration. If None, uses defaults.
    pub config: Option<RagConfig>,
}

impl RuntimeOptions {
    /// Default config over a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self {
            db_path: Some(PathBuf::from(":memory:")),
            config: None,
        }
    }
}

/// The service facade.
///
/// Synchronous operations block the calling thread on SQLite. From async
/// code use the `*_with_timeout` variants, which need the runtime behind an
/// `Arc`.
pub struct RagRuntime {
    storage: Arc<StorageEngine>,
    embeddings: EmbeddingEngine,
    config: RagConfig,
}

impl RagRuntime {
    pub fn new(opts: RuntimeOptions) -> RagResult<Self> {
        let mut config = opts.config.unwrap_or_default();
        if let Some(path) = opts.db_path {
            config.storage.db_path = path.to_string_lossy().into_owned();
        }
        config.validate()?;

        let storage = Arc::new(StorageEngine::open_with_config(&config.storage)?);
        let embeddings = EmbeddingEngine::new(config.embedding.clone())?;

        info!(
            db_path = %config.storage.db_path,
            provider = embeddings.active_provider(),
            dims = config.embedding.dimensions,
            "runtime initialized"
        );
        Ok(Self {
            storage,
            embeddings,
            config,
        })
    }

    /// Build the runtime on the blocking pool. Use this from inside a tokio
    /// runtime, where opening storage synchronously would panic.
    pub async fn open(opts: RuntimeOptions) -> RagResult<Arc<Self>> {
        tokio::task::spawn_blocking(move || Self::new(opts).map(Arc::new))
            .await
            .map_err(|e| RagError::Internal(format!("runtime init task failed: {e}")))?
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub fn storage(&self) -> Arc<StorageEngine> {
        Arc::clone(&self.storage)
    }

    pub fn embeddings(&self) -> &EmbeddingEngine {
        &self.embeddings
    }

    // --- Synchronous operations ---

    pub fn ingest_text(&self, req: IngestTextRequest) -> RagResult<IngestResponse> {
        self.traced(&RequestContext::new("ingest_text"), |ctx| {
            self.ingest_text_in(ctx, &req)
        })
    }

    /// Read a UTF-8 file and ingest it under its file name.
    pub fn ingest_file(&self, path: &Path) -> RagResult<IngestResponse> {
        self.traced(&RequestContext::new("ingest_file"), |ctx| {
            self.ingest_file_in(ctx, path)
        })
    }

    /// Ingest uploaded bytes. A missing or empty name becomes `"upload"`.
    pub fn ingest_upload(
        &self,
        file_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> RagResult<IngestResponse> {
        self.traced(&RequestContext::new("ingest_file"), |ctx| {
            self.ingest_upload_in(ctx, file_name, bytes)
        })
    }

    pub fn search(&self, req: SearchRequest) -> RagResult<SearchResponse> {
        self.traced(&RequestContext::new("search"), |ctx| self.search_in(ctx, &req))
    }

    pub fn answer(&self, req: AnswerRequest) -> RagResult<AnswerResponse> {
        self.traced(&RequestContext::new("answer"), |ctx| self.answer_in(ctx, &req))
    }

    pub fn reindex(&self, batch_size: usize) -> RagResult<ReindexReport> {
        self.traced(&RequestContext::new("reindex"), |ctx| {
            Reindexer::new(self.storage.as_ref(), &self.embeddings)
                .run_with_context(ctx, batch_size)
        })
    }

    pub fn health(&self) -> RagResult<HealthStatus> {
        self.traced(&RequestContext::new("health"), |_| self.health_in())
    }

    /// Ingest every built-in sample, in order. Each sample commits on its
    /// own, so a failure keeps the samples stored before it.
    pub fn load_samples(&self) -> RagResult<Vec<IngestResponse>> {
        self.traced(&RequestContext::new("load_samples"), |ctx| {
            SAMPLES
                .iter()
                .map(|s| self.ingest_text_in(ctx, &sample_request(s)))
                .collect()
        })
    }

    // --- Async operations with a deadline ---

    pub async fn ingest_text_with_timeout(
        self: &Arc<Self>,
        req: IngestTextRequest,
        timeout: Duration,
    ) -> RagResult<IngestResponse> {
        self.run_blocking("ingest_text", timeout, move |rt, ctx| rt.ingest_text_in(ctx, &req))
            .await
    }

    pub async fn ingest_file_with_timeout(
        self: &Arc<Self>,
        path: PathBuf,
        timeout: Duration,
    ) -> RagResult<IngestResponse> {
        self.run_blocking("ingest_file", timeout, move |rt, ctx| rt.ingest_file_in(ctx, &path))
            .await
    }

    pub async fn search_with_timeout(
        self: &Arc<Self>,
        req: SearchRequest,
        timeout: Duration,
    ) -> RagResult<SearchResponse> {
        self.run_blocking("search", timeout, move |rt, ctx| rt.search_in(ctx, &req))
            .await
    }

    pub async fn answer_with_timeout(
        self: &Arc<Self>,
        req: AnswerRequest,
        timeout: Duration,
    ) -> RagResult<AnswerResponse> {
        self.run_blocking("answer", timeout, move |rt, ctx| rt.answer_in(ctx, &req))
            .await
    }

    pub async fn reindex_with_timeout(
        self: &Arc<Self>,
        batch_size: usize,
        timeout: Duration,
    ) -> RagResult<ReindexReport> {
        self.run_blocking("reindex", timeout, move |rt, ctx| {
            Reindexer::new(rt.storage.as_ref(), &rt.embeddings)
                .run_with_context(ctx, batch_size)
        })
        .await
    }

    pub async fn health_with_timeout(
        self: &Arc<Self>,
        timeout: Duration,
    ) -> RagResult<HealthStatus> {
        self.run_blocking("health", timeout, |rt, _| rt.health_in())
            .await
    }

    /// No sample commits after the deadline. Samples committed before it
    /// stay stored even though the call reports `DeadlineExceeded`.
    pub async fn load_samples_with_timeout(
        self: &Arc<Self>,
        timeout: Duration,
    ) -> RagResult<Vec<IngestResponse>> {
        self.run_blocking("load_samples", timeout, |rt, ctx| {
            SAMPLES
                .iter()
                .map(|s| rt.ingest_text_in(ctx, &sample_request(s)))
                .collect()
        })
        .await
    }

    // --- Internals ---

    fn ingest_text_in(
        &self,
        ctx: &RequestContext,
        req: &IngestTextRequest,
    ) -> RagResult<IngestResponse> {
        require_non_empty("text", &req.text)?;
        let receipt = self.pipeline()?.ingest_with_context(ctx, &req.text, &req.source)?;
        Ok(IngestResponse {
            message: format!(
                "Ingested {} chunks from source '{}'",
                receipt.chunk_count, req.source
            ),
            document_id: receipt.document_id,
            chunks_created: receipt.chunk_count,
        })
    }

    fn ingest_file_in(&self, ctx: &RequestContext, path: &Path) -> RagResult<IngestResponse> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RagError::NotFound {
                entity: "file".into(),
                id: path.display().to_string(),
            },
            _ => RagError::Internal(format!("read {}: {e}", path.display())),
        })?;
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        self.ingest_upload_in(ctx, name.as_deref(), bytes)
    }

    fn ingest_upload_in(
        &self,
        ctx: &RequestContext,
        file_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> RagResult<IngestResponse> {
        let text = String::from_utf8(bytes)?;
        let source = file_name
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_SOURCE);
        let receipt = self.pipeline()?.ingest_with_context(ctx, &text, source)?;
        Ok(IngestResponse {
            message: format!(
                "Ingested {} chunks from file '{source}'",
                receipt.chunk_count
            ),
            document_id: receipt.document_id,
            chunks_created: receipt.chunk_count,
        })
    }

    fn search_in(&self, ctx: &RequestContext, req: &SearchRequest) -> RagResult<SearchResponse> {
        require_non_empty("q", &req.q)?;
        let top_k = resolve_top_k(req.top_k, &self.config.retrieval)?;
        let results = self.retriever().retrieve_with_context(ctx, &req.q, top_k)?;
        Ok(SearchResponse {
            query: req.q.clone(),
            count: results.len(),
            results,
        })
    }

    fn answer_in(&self, ctx: &RequestContext, req: &AnswerRequest) -> RagResult<AnswerResponse> {
        require_non_empty("question", &req.question)?;
        let top_k = resolve_top_k(req.top_k, &self.config.retrieval)?;
        let sources = self
            .retriever()
            .retrieve_with_context(ctx, &req.question, top_k)?;
        Ok(AnswerResponse {
            question: req.question.clone(),
            answer: compose_answer(&req.question, &sources),
            sources,
        })
    }

    fn health_in(&self) -> RagResult<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".to_string(),
            documents: self.storage.count_documents()?,
            chunks: self.storage.count_chunks()?,
            embedding_dim: self.embeddings.dimensions(),
            provider: self.embeddings.active_provider().to_string(),
        })
    }

    fn pipeline(&self) -> RagResult<IngestionPipeline<'_>> {
        IngestionPipeline::new(self.storage.as_ref(), &self.embeddings, &self.config.chunking)
    }

    fn retriever(&self) -> RetrievalEngine<'_> {
        RetrievalEngine::new(
            self.storage.as_ref(),
            &self.embeddings,
            self.config.retrieval.clone(),
        )
    }

    /// Run `f` inside the request span, bracketed by start and end events.
    fn traced<T, F>(&self, ctx: &RequestContext, f: F) -> RagResult<T>
    where
        F: FnOnce(&RequestContext) -> RagResult<T>,
    {
        let _span = ctx.span().entered();
        events::request_started(ctx.trace_id(), ctx.operation());
        let result = f(ctx);
        match &result {
            Ok(_) => events::request_completed(ctx.trace_id(), ctx.operation(), ctx.elapsed_ms()),
            Err(e) => events::request_failed(
                ctx.trace_id(),
                ctx.operation(),
                ctx.elapsed_ms(),
                &e.to_string(),
            ),
        }
        result
    }

    /// Run `f` on the blocking pool with a deadline of `timeout`. The same
    /// deadline is checked inside the engines, so work that outlives the
    /// timeout stops at its next storage call.
    async fn run_blocking<T, F>(
        self: &Arc<Self>,
        operation: &'static str,
        timeout: Duration,
        f: F,
    ) -> RagResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&RagRuntime, &RequestContext) -> RagResult<T> + Send + 'static,
    {
        let ctx = RequestContext::new(operation).with_timeout(timeout);
        let task_ctx = ctx.clone();
        let rt = Arc::clone(self);
        let handle = tokio::task::spawn_blocking(move || {
            rt.traced(&task_ctx, |ctx| f(rt.as_ref(), ctx))
        });

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(RagError::Internal(format!(
                "{operation} task failed: {join_err}"
            ))),
            Err(_) => {
                let err = RagError::DeadlineExceeded {
                    operation: operation.to_string(),
                    elapsed_ms: ctx.elapsed_ms(),
                };
                events::request_failed(
                    ctx.trace_id(),
                    operation,
                    ctx.elapsed_ms(),
                    &err.to_string(),
                );
                Err(err)
            }
        }
    }
}

fn sample_request(sample: &Sample) -> IngestTextRequest {
    IngestTextRequest::new(sample.text).with_source(sample.source)
}
