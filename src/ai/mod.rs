//! AI Integration Layer
//!
//! LLM providers and the helpers that bound their calls.

pub mod provider;
pub mod timeout;

pub use provider::{
    ErrorCategory, ErrorClassifier, LlmError, LlmProvider, LlmResponse, OllamaProvider,
    OpenAiProvider, ProviderConfig, ResponseMetadata, ResponseTiming, RetryingProvider,
    SharedProvider, TokenUsage, create_provider, retry_budget,
};
pub use timeout::with_timeout;
