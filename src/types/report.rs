//! Per-file and per-project documentation containers.
//!
//! Both containers keep insertion order and unique keys: inserting an entry
//! whose key already exists replaces it in place.

use crate::analyzer::language::Language;

/// Text produced for one (file, persona) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFragment {
    pub persona: String,
    pub text: String,
    /// True when `text` is the placeholder written after a collaborator failure
    pub failed: bool,
}

impl DocumentFragment {
    pub fn new(persona: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            text: text.into(),
            failed: false,
        }
    }

    pub fn placeholder(persona: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            text: text.into(),
            failed: true,
        }
    }
}

/// All fragments for one source file, in persona evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDocumentBundle {
    pub file: String,
    pub language: Language,
    fragments: Vec<DocumentFragment>,
}

impl FileDocumentBundle {
    pub fn new(file: impl Into<String>, language: Language) -> Self {
        Self {
            file: file.into(),
            language,
            fragments: Vec::new(),
        }
    }

    pub fn insert(&mut self, fragment: DocumentFragment) {
        match self
            .fragments
            .iter_mut()
            .find(|f| f.persona == fragment.persona)
        {
            Some(existing) => *existing = fragment,
            None => self.fragments.push(fragment),
        }
    }

    pub fn get(&self, persona: &str) -> Option<&DocumentFragment> {
        self.fragments.iter().find(|f| f.persona == persona)
    }

    pub fn fragments(&self) -> &[DocumentFragment] {
        &self.fragments
    }

    pub fn persona_names(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.persona.as_str()).collect()
    }

    pub fn failed_count(&self) -> usize {
        self.fragments.iter().filter(|f| f.failed).count()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Every documented file of one run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectReport {
    bundles: Vec<FileDocumentBundle>,
}

impl ProjectReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bundle: FileDocumentBundle) {
        match self.bundles.iter_mut().find(|b| b.file == bundle.file) {
            Some(existing) => *existing = bundle,
            None => self.bundles.push(bundle),
        }
    }

    pub fn get(&self, file: &str) -> Option<&FileDocumentBundle> {
        self.bundles.iter().find(|b| b.file == file)
    }

    pub fn bundles(&self) -> &[FileDocumentBundle] {
        &self.bundles
    }

    pub fn file_ids(&self) -> Vec<&str> {
        self.bundles.iter().map(|b| b.file.as_str()).collect()
    }

    /// Number of placeholder fragments across all files
    pub fn failed_fragments(&self) -> usize {
        self.bundles.iter().map(FileDocumentBundle::failed_count).sum()
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_keeps_insertion_order() {
        let mut bundle = FileDocumentBundle::new("a.py", Language::Python);
        bundle.insert(DocumentFragment::new("Architect Agent", "one"));
        bundle.insert(DocumentFragment::new("Developer Agent", "two"));
        bundle.insert(DocumentFragment::placeholder("User Agent", "unavailable"));

        assert_eq!(
            bundle.persona_names(),
            vec!["Architect Agent", "Developer Agent", "User Agent"]
        );
        assert_eq!(bundle.failed_count(), 1);
    }

    #[test]
    fn test_bundle_replaces_duplicate_persona() {
        let mut bundle = FileDocumentBundle::new("a.py", Language::Python);
        bundle.insert(DocumentFragment::new("Architect Agent", "old"));
        bundle.insert(DocumentFragment::new("Developer Agent", "dev"));
        bundle.insert(DocumentFragment::new("Architect Agent", "new"));

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.persona_names()[0], "Architect Agent");
        assert_eq!(bundle.get("Architect Agent").map(|f| f.text.as_str()), Some("new"));
    }

    #[test]
    fn test_report_unique_keys() {
        let mut report = ProjectReport::new();
        report.insert(FileDocumentBundle::new("a.py", Language::Python));
        report.insert(FileDocumentBundle::new("b.rs", Language::Rust));
        report.insert(FileDocumentBundle::new("a.py", Language::Python));

        assert_eq!(report.file_ids(), vec!["a.py", "b.rs"]);
        assert!(report.get("b.rs").is_some());
        assert!(report.get("c.go").is_none());
    }
}
