//! Generate Command
//!
//! Full pipeline: acquire → discover → summarize → document → export.
//!
//! Usage:
//!   autodocs generate [--zip <file> | --repo <url> | --path <dir>]
//!                     [--output <dir>] [--provider <name>] [--model <name>]
//!                     [--concurrency <n>] [--pdf] [--dry-run]

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::acquire::{SourceTree, clone_repository, extract_archive};
use crate::ai::{create_provider, retry_budget};
use crate::analyzer::{ExtractorRegistry, FileScanner};
use crate::cli::Output;
use crate::config::{Config, ConfigLoader};
use crate::constants::llm;
use crate::docs::{
    AggregatorOptions, DocumentAggregator, default_personas, render_markdown, render_pdf,
    write_markdown,
};
use crate::types::{AutodocError, Result, SourceUnit};

/// Where the source tree comes from
#[derive(Debug, Clone)]
pub enum SourceInput {
    Zip(PathBuf),
    Repo(String),
    Path(PathBuf),
}

impl Default for SourceInput {
    fn default() -> Self {
        SourceInput::Path(PathBuf::from("."))
    }
}

/// Generate run options (consolidated parameters)
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub source: SourceInput,
    /// Output directory override
    pub output: Option<PathBuf>,
    /// LLM provider override
    pub provider: Option<String>,
    /// Model override
    pub model: Option<String>,
    /// Files documented at once
    pub concurrency: Option<usize>,
    /// Also render a PDF next to the markdown report
    pub pdf: bool,
    /// List what would be documented without calling the LLM
    pub dry_run: bool,
    pub quiet: bool,
}

/// Run the pipeline with options
pub fn run(options: GenerateOptions) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    apply_overrides(&mut config, &options);
    config.validate()?;

    let rt = Runtime::new()?;
    rt.block_on(run_pipeline(&config, &options))
}

fn apply_overrides(config: &mut Config, options: &GenerateOptions) {
    if let Some(provider) = &options.provider {
        config.llm.provider = provider.clone();
        // The hosted default model means nothing to a local Ollama server
        if provider == "ollama" && options.model.is_none() && config.llm.model == llm::DEFAULT_MODEL {
            config.llm.model.clear();
        }
    }
    if let Some(model) = &options.model {
        config.llm.model = model.clone();
    }
    if let Some(concurrency) = options.concurrency {
        config.run.concurrency = concurrency;
    }
    if let Some(output) = &options.output {
        config.export.output_dir = output.to_string_lossy().into_owned();
    }
}

async fn acquire(source: &SourceInput) -> Result<SourceTree> {
    match source {
        SourceInput::Zip(path) => extract_archive(path),
        SourceInput::Repo(url) => clone_repository(url).await,
        SourceInput::Path(path) => SourceTree::local(path),
    }
}

async fn run_pipeline(config: &Config, options: &GenerateOptions) -> Result<()> {
    let output = Output::quiet(options.quiet);
    let start = Instant::now();

    output.header("autodocs");
    let tree = acquire(&options.source).await?;
    info!("Source tree: {}", tree.root().display());

    let units = FileScanner::new(tree.root())
        .with_exclude(&config.analysis.exclude)?
        .with_max_file_size(config.analysis.max_file_size)
        .scan()?;
    output.field("Source files", units.len());

    let registry = ExtractorRegistry::with_defaults();

    if options.dry_run {
        print_dry_run(&output, &registry, &units);
        return Ok(());
    }

    if units.is_empty() {
        output.warning("No supported source files found");
    }

    let provider = create_provider(&config.llm.provider_config())?;
    output.field("Provider", format!("{} ({})", provider.name(), provider.model()));

    let aggregator = DocumentAggregator::new(provider, default_personas()).with_options(
        AggregatorOptions {
            max_code_chars: config.analysis.max_code_chars,
            timeout: retry_budget(
                Duration::from_secs(config.llm.timeout_secs),
                config.llm.max_retries,
            ),
            concurrency: config.run.concurrency,
        },
    );
    let report = aggregator.document_units(&registry, &units).await;

    let output_dir = Path::new(&config.export.output_dir);
    let markdown = render_markdown(&report);
    let md_path = write_markdown(&markdown, output_dir, &config.export.markdown_file)?;

    output.section("Summary");
    output.field("Documented", report.len());
    output.field("Skipped", units.len().saturating_sub(report.len()));
    output.field("Failed", report.failed_fragments());
    output.field("Duration", format!("{}s", start.elapsed().as_secs()));
    output.success(&format!("Markdown saved to {}", md_path.display()));

    if report.failed_fragments() > 0 {
        output.warning(&format!(
            "{} fragment(s) could not be generated; see placeholders in the report",
            report.failed_fragments()
        ));
    }

    if options.pdf {
        match render_pdf(&markdown, output_dir, &config.export.pdf_prefix) {
            Ok(pdf_path) => output.success(&format!("PDF saved to {}", pdf_path.display())),
            Err(e) => {
                warn!("PDF export failed: {}", e);
                output.error(&format!("PDF export failed: {}", e));
            }
        }
    }

    Ok(())
}

fn print_dry_run(output: &Output, registry: &ExtractorRegistry, units: &[SourceUnit]) {
    output.section("[Dry Run] Files to document");
    for unit in units {
        match registry.summarize(unit) {
            Some(summary) => {
                let mut counts = vec![
                    format!("{} functions", summary.functions.len()),
                    format!("{} classes", summary.classes.len()),
                ];
                counts.extend(
                    summary
                        .extras
                        .iter()
                        .map(|(name, set)| format!("{} {}", set.len(), name)),
                );
                println!(
                    "  {} [{}, {}] {}",
                    unit.path,
                    unit.language,
                    registry.strategy_for(unit.language),
                    counts.join(", ")
                );
            }
            None => println!("  {} [{}] skipped: no summary", unit.path, unit.language),
        }
    }
}

/// Reject conflicting source flags.
pub fn select_source(
    zip: Option<PathBuf>,
    repo: Option<String>,
    path: Option<PathBuf>,
) -> Result<SourceInput> {
    match (zip, repo, path) {
        (Some(zip), None, None) => Ok(SourceInput::Zip(zip)),
        (None, Some(repo), None) => Ok(SourceInput::Repo(repo)),
        (None, None, Some(path)) => Ok(SourceInput::Path(path)),
        (None, None, None) => Ok(SourceInput::default()),
        _ => Err(AutodocError::Config(
            "Use only one of --zip, --repo or --path".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_source() {
        assert!(matches!(
            select_source(None, None, None).unwrap(),
            SourceInput::Path(p) if p == PathBuf::from(".")
        ));
        assert!(matches!(
            select_source(Some("a.zip".into()), None, None).unwrap(),
            SourceInput::Zip(_)
        ));
        assert!(matches!(
            select_source(None, Some("https://example.com/r.git".into()), None).unwrap(),
            SourceInput::Repo(_)
        ));
        assert!(select_source(Some("a.zip".into()), Some("u".into()), None).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let options = GenerateOptions {
            provider: Some("ollama".to_string()),
            model: Some("llama3".to_string()),
            concurrency: Some(4),
            output: Some(PathBuf::from("out")),
            ..Default::default()
        };
        apply_overrides(&mut config, &options);

        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.run.concurrency, 4);
        assert_eq!(config.export.output_dir, "out");
    }

    #[test]
    fn test_ollama_override_drops_hosted_default_model() {
        let mut config = Config::default();
        let options = GenerateOptions {
            provider: Some("ollama".to_string()),
            ..Default::default()
        };
        apply_overrides(&mut config, &options);
        assert!(config.llm.provider_config().model.is_none());
    }

    #[test]
    fn test_zero_concurrency_override_is_rejected() {
        let mut config = Config::default();
        let options = GenerateOptions {
            concurrency: Some(0),
            ..Default::default()
        };
        apply_overrides(&mut config, &options);
        assert!(config.validate().is_err());
    }
}
