mod api;
mod chunk;
mod document;
mod reports;

pub use api::{
    AnswerRequest, AnswerResponse, HealthStatus, IngestResponse, IngestTextRequest,
    SearchRequest, SearchResponse,
};
pub use chunk::{ChunkRecord, NewChunk, ScoredChunk, TextChunk};
pub use document::Document;
pub use reports::{IngestReceipt, ReindexReport};
