//! Document Aggregator
//!
//! Pairs every structural summary with every persona, asks the injected
//! text-generation collaborator for each fragment, and assembles the results
//! into a [`ProjectReport`].
//!
//! ## Failure containment
//!
//! - A collaborator failure (error, timeout, empty reply) becomes a visible
//!   placeholder fragment for that one persona; the other personas and files
//!   are unaffected.
//! - A unit without a summary is skipped and contributes no report entry.
//!
//! ## Ordering
//!
//! Files may be documented concurrently (`concurrency > 1`), but the report
//! always lists files in input order and personas in persona-list order.

use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::persona::Persona;
use super::prompt::build_prompt;
use crate::ai::{SharedProvider, with_timeout};
use crate::analyzer::extractor::ExtractorRegistry;
use crate::constants::{analysis, llm, run};
use crate::types::{
    DocumentFragment, FileDocumentBundle, ProjectReport, Result, SourceUnit, StructuralSummary,
};

/// Prefix of every placeholder fragment
pub const PLACEHOLDER_PREFIX: &str = "⚠️ Documentation unavailable";

/// Text shown in place of a fragment whose generation failed.
pub fn placeholder_text(reason: &str) -> String {
    format!("{}: {}", PLACEHOLDER_PREFIX, reason)
}

/// Tuning knobs for one aggregation run
#[derive(Debug, Clone)]
pub struct AggregatorOptions {
    /// Characters of source carried into each prompt (0 = unlimited)
    pub max_code_chars: usize,
    /// Upper bound on one collaborator call, retries included
    pub timeout: Duration,
    /// Files documented at once (1 = sequential)
    pub concurrency: usize,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            max_code_chars: analysis::MAX_CODE_CHARS,
            timeout: Duration::from_secs(llm::DEFAULT_TIMEOUT_SECS),
            concurrency: run::DEFAULT_CONCURRENCY,
        }
    }
}

pub struct DocumentAggregator {
    provider: SharedProvider,
    personas: Vec<Persona>,
    options: AggregatorOptions,
}

impl DocumentAggregator {
    pub fn new(provider: SharedProvider, personas: Vec<Persona>) -> Self {
        Self {
            provider,
            personas,
            options: AggregatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AggregatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    /// One fragment per persona, in persona order. Never fails.
    pub async fn document_file(&self, summary: &StructuralSummary) -> FileDocumentBundle {
        let mut bundle = FileDocumentBundle::new(&summary.path, summary.language);

        for persona in &self.personas {
            let fragment = match self.generate_fragment(persona, summary).await {
                Ok(text) => DocumentFragment::new(persona.name(), text),
                Err(e) => {
                    warn!("{} / {}: {}", summary.path, persona.name(), e);
                    DocumentFragment::placeholder(persona.name(), placeholder_text(&e.to_string()))
                }
            };
            bundle.insert(fragment);
        }

        bundle
    }

    async fn generate_fragment(&self, persona: &Persona, summary: &StructuralSummary) -> Result<String> {
        let prompt = build_prompt(persona, summary, self.options.max_code_chars);
        debug!(
            "{} / {}: prompt of {} chars",
            summary.path,
            persona.name(),
            prompt.len()
        );

        let response = with_timeout(
            self.options.timeout,
            self.provider.generate(&prompt),
            "LLM request",
        )
        .await?;

        let text = response.content.trim();
        if text.is_empty() {
            return Err(crate::types::AutodocError::LlmApi(
                "empty response".to_string(),
            ));
        }
        Ok(text.to_string())
    }

    /// Document summaries in order; concurrency never reorders the report.
    pub async fn document_summaries(&self, summaries: &[StructuralSummary]) -> ProjectReport {
        let total = summaries.len();
        let concurrency = self.options.concurrency.max(1);

        let bundles: Vec<FileDocumentBundle> = stream::iter(summaries.iter().enumerate())
            .map(|(idx, summary)| async move {
                info!("[{}/{}] Documenting {}", idx + 1, total, summary.path);
                self.document_file(summary).await
            })
            .buffered(concurrency)
            .collect()
            .await;

        let mut report = ProjectReport::new();
        for bundle in bundles {
            report.insert(bundle);
        }
        report
    }

    /// Summarize then document; units without a summary are skipped.
    pub async fn document_units(
        &self,
        registry: &ExtractorRegistry,
        units: &[SourceUnit],
    ) -> ProjectReport {
        let summaries: Vec<StructuralSummary> = units
            .iter()
            .filter_map(|unit| {
                let summary = registry.summarize(unit);
                if summary.is_none() {
                    warn!("Skipping {}: no structural summary", unit.path);
                }
                summary
            })
            .collect();

        self.document_summaries(&summaries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{LlmProvider, LlmResponse, RetryingProvider, retry_budget};
    use crate::analyzer::language::Language;
    use crate::types::{AutodocError, Categories};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies with the persona named in the prompt's closing line.
    struct EchoPersona {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for EchoPersona {
        async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let persona = prompt
                .rsplit("Please respond as the ")
                .next()
                .and_then(|tail| tail.split(',').next())
                .unwrap_or_default();
            Ok(LlmResponse::content_only(persona))
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    /// Fails for one (file, persona) pair, echoes otherwise.
    struct FailOne {
        file: &'static str,
        persona: &'static str,
    }

    #[async_trait]
    impl LlmProvider for FailOne {
        async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
            if prompt.contains(&format!("File: {}\n", self.file))
                && prompt.contains(&format!("respond as the {},", self.persona))
            {
                return Err(AutodocError::LlmApi("boom".to_string()));
            }
            Ok(LlmResponse::content_only("fine"))
        }

        fn name(&self) -> &str {
            "fail-one"
        }

        fn model(&self) -> &str {
            "fail-one"
        }
    }

    struct Slow;

    #[async_trait]
    impl LlmProvider for Slow {
        async fn generate(&self, _prompt: &str) -> Result<LlmResponse> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(LlmResponse::content_only("late"))
        }

        fn name(&self) -> &str {
            "slow"
        }

        fn model(&self) -> &str {
            "slow"
        }
    }

    struct Blank;

    #[async_trait]
    impl LlmProvider for Blank {
        async fn generate(&self, _prompt: &str) -> Result<LlmResponse> {
            Ok(LlmResponse::content_only("   "))
        }

        fn name(&self) -> &str {
            "blank"
        }

        fn model(&self) -> &str {
            "blank"
        }
    }

    fn summary(path: &str) -> StructuralSummary {
        StructuralSummary::from_parts(path, Language::classify(path), "x".to_string(), Categories::new())
    }

    fn persona_names(bundle: &FileDocumentBundle) -> Vec<&str> {
        bundle.persona_names()
    }

    #[tokio::test]
    async fn test_persona_order_and_echo() {
        let provider = Arc::new(EchoPersona {
            calls: AtomicUsize::new(0),
        });
        let aggregator = DocumentAggregator::new(provider.clone(), crate::docs::default_personas());

        let bundle = aggregator.document_file(&summary("a.py")).await;
        assert_eq!(
            persona_names(&bundle),
            vec!["Architect Agent", "Developer Agent", "User Agent"]
        );
        assert_eq!(bundle.get("User Agent").unwrap().text, "User Agent");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failure_isolated_to_one_fragment() {
        let provider = Arc::new(FailOne {
            file: "b.rs",
            persona: "Developer Agent",
        });
        let aggregator = DocumentAggregator::new(provider, crate::docs::default_personas());

        let report = aggregator
            .document_summaries(&[summary("a.py"), summary("b.rs"), summary("c.go")])
            .await;

        assert_eq!(report.file_ids(), vec!["a.py", "b.rs", "c.go"]);
        assert_eq!(report.failed_fragments(), 1);

        let failed = report.get("b.rs").unwrap().get("Developer Agent").unwrap();
        assert!(failed.failed);
        assert!(failed.text.starts_with(PLACEHOLDER_PREFIX));

        for bundle in report.bundles() {
            assert_eq!(bundle.len(), 3);
        }
        assert_eq!(report.get("b.rs").unwrap().get("User Agent").unwrap().text, "fine");
    }

    #[tokio::test]
    async fn test_concurrency_preserves_order() {
        let provider = Arc::new(EchoPersona {
            calls: AtomicUsize::new(0),
        });
        let aggregator = DocumentAggregator::new(provider, vec![Persona::user()]).with_options(
            AggregatorOptions {
                concurrency: 4,
                ..Default::default()
            },
        );

        let paths: Vec<String> = (0..12).map(|i| format!("f{:02}.rs", i)).collect();
        let summaries: Vec<_> = paths.iter().map(|p| summary(p)).collect();
        let report = aggregator.document_summaries(&summaries).await;

        assert_eq!(report.file_ids(), paths.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_timeout_becomes_placeholder() {
        let aggregator = DocumentAggregator::new(Arc::new(Slow), vec![Persona::architect()])
            .with_options(AggregatorOptions {
                timeout: Duration::from_millis(10),
                ..Default::default()
            });

        let bundle = aggregator.document_file(&summary("a.py")).await;
        let fragment = bundle.get("Architect Agent").unwrap();
        assert!(fragment.failed);
        assert!(fragment.text.contains("Timeout"));
    }

    /// Hangs on its first call only.
    struct HangOnce {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for HangOnce {
        async fn generate(&self, _prompt: &str) -> Result<LlmResponse> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
            Ok(LlmResponse::content_only("ok"))
        }

        fn name(&self) -> &str {
            "hang-once"
        }

        fn model(&self) -> &str {
            "hang-once"
        }
    }

    #[tokio::test]
    async fn test_hung_attempt_is_retried_within_budget() {
        let inner = Arc::new(HangOnce {
            calls: AtomicUsize::new(0),
        });
        let attempt_timeout = Duration::from_millis(100);
        let provider = Arc::new(
            RetryingProvider::with_delays(
                inner.clone(),
                2,
                Duration::from_millis(1),
                Duration::from_millis(2),
            )
            .with_attempt_timeout(attempt_timeout),
        );
        let aggregator = DocumentAggregator::new(provider, vec![Persona::architect()])
            .with_options(AggregatorOptions {
                timeout: retry_budget(attempt_timeout, 2),
                ..Default::default()
            });

        let bundle = aggregator.document_file(&summary("a.py")).await;
        let fragment = bundle.get("Architect Agent").unwrap();
        assert!(!fragment.failed);
        assert_eq!(fragment.text, "ok");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_reply_becomes_placeholder() {
        let aggregator = DocumentAggregator::new(Arc::new(Blank), vec![Persona::user()]);
        let bundle = aggregator.document_file(&summary("a.py")).await;
        assert!(bundle.get("User Agent").unwrap().failed);
    }

    #[tokio::test]
    async fn test_units_without_summary_are_skipped() {
        let provider = Arc::new(EchoPersona {
            calls: AtomicUsize::new(0),
        });
        let aggregator = DocumentAggregator::new(provider.clone(), vec![Persona::developer()]);
        let registry = ExtractorRegistry::with_defaults();

        let units = vec![
            SourceUnit::new("good.py", "def ok():\n    pass\n"),
            SourceUnit::new("bad.py", "def broken(:\n"),
            SourceUnit::new("nb.ipynb", "{not json"),
            SourceUnit::new("lib.rs", "fn f() {}"),
        ];
        let report = aggregator.document_units(&registry, &units).await;

        assert_eq!(report.file_ids(), vec!["good.py", "lib.rs"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
