//! autodocs - Multi-Persona Codebase Documentation Generator
//!
//! Turns a source archive, repository or directory into a markdown (and
//! optionally PDF) report in which every source file is described from
//! several reader perspectives by an LLM.
//!
//! ## Pipeline
//!
//! 1. [`acquire`]: unpack a zip or shallow-clone a repository
//! 2. [`analyzer`]: discover files, classify by extension, extract structure
//! 3. [`docs`]: prompt each persona per file and aggregate the fragments
//! 4. [`docs::render`]: markdown and PDF export
//!
//! ## Quick Start
//!
//! ```ignore
//! use autodocs::{DocumentAggregator, ExtractorRegistry, FileScanner, default_personas};
//! use autodocs::ai::{ProviderConfig, create_provider};
//!
//! let units = FileScanner::new("./project").scan()?;
//! let provider = create_provider(&ProviderConfig::default())?;
//! let aggregator = DocumentAggregator::new(provider, default_personas());
//! let report = aggregator
//!     .document_units(&ExtractorRegistry::with_defaults(), &units)
//!     .await;
//! let markdown = autodocs::render_markdown(&report);
//! ```

pub mod acquire;
pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod docs;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader};
pub use types::{
    AutodocError, DocumentFragment, FileDocumentBundle, ProjectReport, Result, SourceUnit,
    StructuralSummary,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use acquire::{SourceTree, clone_repository, extract_archive};
pub use ai::{LlmProvider, LlmResponse, SharedProvider, create_provider};
pub use analyzer::{ExtractorRegistry, FileScanner, Language, classify, supported_extensions};
pub use docs::{
    AggregatorOptions, DocumentAggregator, Persona, default_personas, render_markdown,
    render_pdf, write_markdown,
};
