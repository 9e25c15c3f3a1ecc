/// Workspace version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal places kept on fused scores handed to callers.
pub const SCORE_DECIMALS: i32 = 6;

/// Multiplier applied to `top_k` when requesting candidates from each channel.
pub const CANDIDATE_MULTIPLIER: usize = 2;

/// Source label used when a caller does not provide one.
pub const DEFAULT_SOURCE: &str = "manual";

/// Source label used for uploaded content without a file name.
pub const DEFAULT_UPLOAD_SOURCE: &str = "upload";

/// Length of a generated trace id (hex characters).
pub const TRACE_ID_LEN: usize = 16;
