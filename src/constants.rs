//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Text-generation collaborator defaults
pub mod llm {
    /// OpenAI-compatible endpoint used when none is configured
    pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

    /// Model used when none is configured
    pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.4;

    /// Upper bound on generated tokens per fragment
    pub const DEFAULT_MAX_TOKENS: usize = 1024;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Extra attempts for rate limits and transient failures
    pub const DEFAULT_MAX_RETRIES: usize = 2;

    /// Accepted temperature range
    pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;
}

/// File analysis constants
pub mod analysis {
    /// Maximum file size to read (1MB)
    pub const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Characters of source carried into a prompt (0 = unlimited)
    pub const MAX_CODE_CHARS: usize = 0;
}

/// Export constants
pub mod export {
    pub const OUTPUT_DIR: &str = "docs";
    pub const MARKDOWN_FILE: &str = "auto_docs.md";
    pub const PDF_PREFIX: &str = "auto_docs";

    /// Hex characters in the per-export PDF suffix
    pub const PDF_SUFFIX_LEN: usize = 6;
}

/// Run-level constants
pub mod run {
    /// Files documented at once; 1 keeps the run strictly sequential
    pub const DEFAULT_CONCURRENCY: usize = 1;
}
