use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use rag_core::config::RagConfig;
use rag_core::constants::DEFAULT_SOURCE;
use rag_core::errors::RagError;
use rag_core::models::{AnswerRequest, IngestTextRequest, SearchRequest};
use rag_runtime::{RagRuntime, RuntimeOptions};
use serde::Serialize;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "ragctl",
    version,
    about = "Ingest text and query it with hybrid (vector + keyword) retrieval"
)]
struct Cli {
    /// SQLite database path (overrides storage.db_path; ":memory:" for a scratch store)
    #[arg(long, global = true, env = "RAG_DB_PATH")]
    db: Option<PathBuf>,

    /// TOML config file (defaults to $RAG_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Per-command deadline in milliseconds
    #[arg(long, global = true, default_value_t = 30_000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chunk, embed and store a text or a UTF-8 file
    #[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
    Ingest {
        /// Raw text to ingest
        #[arg(long)]
        text: Option<String>,

        /// File to ingest; its name becomes the source label
        #[arg(long)]
        file: Option<PathBuf>,

        /// Source label for --text
        #[arg(long, default_value = DEFAULT_SOURCE, conflicts_with = "file")]
        source: String,
    },
    /// Hybrid search over stored chunks
    Search {
        query: String,

        /// Number of results (1-50; config default when omitted)
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Retrieve passages and compose an answer
    Answer {
        question: String,

        /// Number of passages (1-50; config default when omitted)
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Re-embed every stored chunk with the current embedder
    Reindex {
        /// Chunks per batch (embedding.batch_size when omitted)
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Ingest the built-in sample documents
    LoadSamples,
    /// Document and chunk counts plus embedder details
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<RagError>() {
                Some(rag) => match serde_json::to_string_pretty(&rag.report()) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("error: {rag}"),
                },
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    rag_observability::init_tracing(&config.observability);
    let default_batch = config.embedding.batch_size;
    debug!(?cli.command, db = ?cli.db, "ragctl starting");

    let runtime = RagRuntime::open(RuntimeOptions {
        db_path: cli.db,
        config: Some(config),
    })
    .await?;
    let timeout = Duration::from_millis(cli.timeout_ms);

    match cli.command {
        Command::Ingest { text, file, source } => match (text, file) {
            (_, Some(path)) => {
                print_json(&runtime.ingest_file_with_timeout(path, timeout).await?)
            }
            (Some(text), None) => {
                let req = IngestTextRequest::new(text).with_source(source);
                print_json(&runtime.ingest_text_with_timeout(req, timeout).await?)
            }
            (None, None) => anyhow::bail!("one of --text or --file is required"),
        },
        Command::Search { query, top_k } => {
            let mut req = SearchRequest::new(query);
            req.top_k = top_k;
            print_json(&runtime.search_with_timeout(req, timeout).await?)
        }
        Command::Answer { question, top_k } => {
            let mut req = AnswerRequest::new(question);
            req.top_k = top_k;
            print_json(&runtime.answer_with_timeout(req, timeout).await?)
        }
        Command::Reindex { batch_size } => {
            let batch_size = batch_size.unwrap_or(default_batch);
            print_json(&runtime.reindex_with_timeout(batch_size, timeout).await?)
        }
        Command::LoadSamples => print_json(&runtime.load_samples_with_timeout(timeout).await?),
        Command::Health => print_json(&runtime.health_with_timeout(timeout).await?),
    }
}

/// `--config` file plus `RAG_*` overrides, or `RagConfig::from_env` without one.
fn load_config(path: Option<&std::path::Path>) -> Result<RagConfig> {
    let Some(path) = path else {
        return Ok(RagConfig::from_env()?);
    };
    let mut config = RagConfig::from_file(path)?;
    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{json}");
    Ok(())
}
