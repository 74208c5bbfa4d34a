//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::ai::ProviderConfig;
use crate::constants::{analysis, export, llm, run};
use crate::types::{AutodocError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-generation collaborator settings
    pub llm: LlmConfig,

    /// Discovery and extraction settings
    pub analysis: AnalysisConfig,

    /// Report output settings
    pub export: ExportConfig,

    /// Run scheduling settings
    pub run: RunConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !llm::TEMPERATURE_RANGE.contains(&self.llm.temperature) {
            return Err(AutodocError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(AutodocError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(AutodocError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.run.concurrency == 0 {
            return Err(AutodocError::Config(
                "run.concurrency must be greater than 0".to_string(),
            ));
        }

        if self.export.markdown_file.trim().is_empty() {
            return Err(AutodocError::Config(
                "export.markdown_file must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "openai" (any OpenAI-compatible endpoint) or "ollama"
    pub provider: String,

    /// Model name
    pub model: String,

    /// Endpoint override; provider default when unset
    pub api_base: Option<String>,

    /// Credential; falls back to OPENROUTER_API_KEY / OPENAI_API_KEY.
    /// Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub temperature: f32,

    pub max_tokens: usize,

    /// Extra attempts for rate limits and transient failures
    pub max_retries: usize,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            api_base: None,
            api_key: None,
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            max_retries: llm::DEFAULT_MAX_RETRIES,
        }
    }
}

impl LlmConfig {
    /// Provider construction input; built once per run and injected.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider.clone(),
            model: Some(self.model.clone()).filter(|m| !m.is_empty()),
            timeout_secs: self.timeout_secs,
            temperature: self.temperature,
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            max_tokens: self.max_tokens,
            max_retries: self.max_retries,
        }
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Glob patterns to skip, matched against relative paths
    pub exclude: Vec<String>,

    /// Maximum file size in bytes (0 = unlimited)
    pub max_file_size: u64,

    /// Characters of source included in each prompt (0 = unlimited)
    pub max_code_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude: vec![],
            max_file_size: analysis::MAX_FILE_SIZE,
            max_code_chars: analysis::MAX_CODE_CHARS,
        }
    }
}

// =============================================================================
// Export Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving the markdown and PDF reports
    pub output_dir: String,

    /// Markdown report file name, rewritten on each export
    pub markdown_file: String,

    /// PDF file name prefix; a random suffix keeps exports distinct
    pub pdf_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: export::OUTPUT_DIR.to_string(),
            markdown_file: export::MARKDOWN_FILE.to_string(),
            pdf_prefix: export::PDF_PREFIX.to_string(),
        }
    }
}

// =============================================================================
// Run Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Files documented at once (1 = sequential)
    pub concurrency: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: run::DEFAULT_CONCURRENCY,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
