//! Tracing setup: subscriber init, span definitions, and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use rag_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a filter directive. Overrides `log_level`.
pub const LOG_ENV: &str = "RAG_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber. Idempotent; later calls are no-ops, and an
/// already-installed subscriber from elsewhere is left alone.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config);
        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.is_json() {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_current_span(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if result.is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}

/// `RAG_LOG` when it parses, otherwise the configured level, otherwise `info`.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
