//! Structural Extractor
//!
//! Turns a [`SourceUnit`] into a [`StructuralSummary`] of function, class and
//! language-specific identifier names.
//!
//! ## Strategies
//!
//! - **Exact** ([`PythonExtractor`]): tree-sitter grammar walk, no false positives.
//! - **Approximate** ([`PatternExtractor`]): per-language regex rule tables.
//!   Loose by intent; the output is a hint for the LLM, not ground truth.
//! - **Notebook** ([`NotebookExtractor`]): concatenates code cells, no categories.
//! - **Passthrough** ([`GenericExtractor`]): empty categories, text carried along.
//!
//! Dispatch is a registry keyed by [`Language`]. Adding a language means
//! registering an extractor, not editing a dispatcher.
//!
//! ```rust,ignore
//! let registry = ExtractorRegistry::with_defaults();
//! let unit = SourceUnit::new("a.py", "def foo():\n    pass\n");
//! let summary = registry.summarize(&unit).expect("valid python");
//! assert!(summary.functions.contains("foo"));
//! ```

pub mod notebook;
pub mod patterns;
pub mod python;

pub use notebook::{NotebookExtractor, notebook_code};
pub use patterns::{LanguageRules, PatternExtractor, PatternRule, RULE_TABLES};
pub use python::PythonExtractor;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::language::Language;
use crate::types::{Categories, Result, SourceUnit, StructuralSummary};

/// How an extractor arrives at its identifier sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Exact,
    Approximate,
    Notebook,
    Passthrough,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Exact => write!(f, "exact"),
            Strategy::Approximate => write!(f, "approximate"),
            Strategy::Notebook => write!(f, "notebook"),
            Strategy::Passthrough => write!(f, "passthrough"),
        }
    }
}

pub trait Extractor: Send + Sync {
    /// Summarize one unit. An `Err` means "no summary available".
    fn summarize(&self, unit: &SourceUnit) -> Result<StructuralSummary>;

    fn strategy(&self) -> Strategy;
}

/// Fallback for languages without a registered extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericExtractor;

impl Extractor for GenericExtractor {
    fn summarize(&self, unit: &SourceUnit) -> Result<StructuralSummary> {
        Ok(StructuralSummary::new(unit, Categories::new()))
    }

    fn strategy(&self) -> Strategy {
        Strategy::Passthrough
    }
}

pub type SharedExtractor = Arc<dyn Extractor>;

/// Language → extractor registry.
pub struct ExtractorRegistry {
    extractors: HashMap<Language, SharedExtractor>,
    fallback: GenericExtractor,
}

impl ExtractorRegistry {
    /// Registry with nothing registered; every language uses the fallback.
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
            fallback: GenericExtractor,
        }
    }

    /// Registry with the exact Python extractor, the notebook path and one
    /// pattern extractor per rule table.
    ///
    /// A rule table that fails to compile only affects its own language,
    /// which then falls back to the generic extractor.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        for table in RULE_TABLES {
            match PatternExtractor::new(table) {
                Ok(extractor) => registry.register(table.language, Arc::new(extractor)),
                Err(e) => warn!("Pattern rules for {} disabled: {}", table.language, e),
            }
        }

        match PythonExtractor::new() {
            Ok(extractor) => registry.register(Language::Python, Arc::new(extractor)),
            Err(e) => warn!("Python grammar unavailable: {}", e),
        }

        registry.register(Language::Notebook, Arc::new(NotebookExtractor));
        registry
    }

    /// Register (or replace) the extractor for a language.
    pub fn register(&mut self, language: Language, extractor: SharedExtractor) {
        self.extractors.insert(language, extractor);
    }

    pub fn get(&self, language: Language) -> &dyn Extractor {
        match self.extractors.get(&language) {
            Some(extractor) => extractor.as_ref(),
            None => &self.fallback,
        }
    }

    pub fn strategy_for(&self, language: Language) -> Strategy {
        self.get(language).strategy()
    }

    /// Summarize a unit without ever failing the caller.
    ///
    /// Returns `None` when the extractor reports an error (malformed source,
    /// invalid notebook JSON); the file is then skipped for documentation.
    pub fn summarize(&self, unit: &SourceUnit) -> Option<StructuralSummary> {
        let extractor = self.get(unit.language);
        match extractor.summarize(unit) {
            Ok(summary) => {
                debug!(
                    "{} [{}]: {} functions, {} classes",
                    unit.path,
                    extractor.strategy(),
                    summary.functions.len(),
                    summary.classes.len()
                );
                Some(summary)
            }
            Err(e) => {
                debug!("No summary for {}: {}", unit.path, e);
                None
            }
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
