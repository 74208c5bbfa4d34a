//! Source units and their structural summaries.

use std::collections::{BTreeMap, BTreeSet};

use crate::analyzer::language::Language;

pub const FUNCTIONS: &str = "functions";
pub const CLASSES: &str = "classes";
pub const INTERFACES: &str = "interfaces";
pub const TRAITS: &str = "traits";
pub const PROTOCOLS: &str = "protocols";
pub const MODULES: &str = "modules";

/// One discovered input file, immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Path relative to the scanned root, `/`-separated
    pub path: String,
    pub content: String,
    pub language: Language,
}

impl SourceUnit {
    /// Build a unit, classifying the language from the path.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = Language::classify(&path);
        Self {
            path,
            content: content.into(),
            language,
        }
    }
}

/// Identifier sets produced by one extractor run.
///
/// `functions` and `classes` always exist; anything else a language models
/// (interfaces, traits, ...) lives in `extras`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    pub functions: BTreeSet<String>,
    pub classes: BTreeSet<String>,
    pub extras: BTreeMap<String, BTreeSet<String>>,
}

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name into the named category, creating extras on demand.
    pub fn insert(&mut self, category: &str, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        match category {
            FUNCTIONS => {
                self.functions.insert(name);
            }
            CLASSES => {
                self.classes.insert(name);
            }
            other => {
                self.extras.entry(other.to_string()).or_default().insert(name);
            }
        }
    }

    /// Declare an extra category so it is reported even when nothing matched.
    pub fn declare(&mut self, category: &str) {
        if category != FUNCTIONS && category != CLASSES {
            self.extras.entry(category.to_string()).or_default();
        }
    }
}

/// Extractor output for one [`SourceUnit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralSummary {
    pub path: String,
    pub language: Language,
    /// Raw text carried forward for prompt construction
    pub code: String,
    pub functions: BTreeSet<String>,
    pub classes: BTreeSet<String>,
    /// Language-specific categories such as `interfaces` or `traits`
    pub extras: BTreeMap<String, BTreeSet<String>>,
}

impl StructuralSummary {
    pub fn new(unit: &SourceUnit, categories: Categories) -> Self {
        Self::from_parts(&unit.path, unit.language, unit.content.clone(), categories)
    }

    pub fn from_parts(
        path: &str,
        language: Language,
        code: String,
        categories: Categories,
    ) -> Self {
        Self {
            path: path.to_string(),
            language,
            code,
            functions: categories.functions,
            classes: categories.classes,
            extras: categories.extras,
        }
    }

    /// Look up any category by name, including the two required ones.
    pub fn category(&self, name: &str) -> Option<&BTreeSet<String>> {
        match name {
            FUNCTIONS => Some(&self.functions),
            CLASSES => Some(&self.classes),
            other => self.extras.get(other),
        }
    }

    /// All category names present, required ones first.
    pub fn category_names(&self) -> Vec<&str> {
        let mut names = vec![FUNCTIONS, CLASSES];
        names.extend(self.extras.keys().map(String::as_str));
        names
    }

    /// True when no identifiers were found in any category.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.classes.is_empty()
            && self.extras.values().all(BTreeSet::is_empty)
    }
}
