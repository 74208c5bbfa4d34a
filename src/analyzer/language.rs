//! Extension Classifier
//!
//! **Single source of truth** for mapping file names to languages and for the
//! set of extensions the pipeline is willing to open.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use autodocs::analyzer::language::{Language, classify, is_supported};
//!
//! assert_eq!(classify("src/main.rs"), Language::Rust);
//! assert_eq!(classify("Makefile"), Language::Unknown);
//! assert!(is_supported("component.TSX"));
//! ```
//!
//! Classification looks only at the final dot-delimited suffix of the file
//! name and is case-insensitive. The classifier knows nothing about
//! extraction; the extractor registry is keyed by [`Language`].

use std::fmt;
use std::str::FromStr;

// =============================================================================
// Language Metadata Table
// =============================================================================

struct LanguageMeta {
    /// Display name (human-readable, used in prompts)
    display_name: &'static str,
    /// Lowercase extensions that map to this language
    extensions: &'static [&'static str],
    /// Alternative names accepted by `FromStr`
    aliases: &'static [&'static str],
}

macro_rules! lang_meta {
    ($display:literal, [$($ext:literal),*], [$($alias:literal),*]) => {
        LanguageMeta {
            display_name: $display,
            extensions: &[$($ext),*],
            aliases: &[$($alias),*],
        }
    };
}

impl Language {
    fn meta(&self) -> LanguageMeta {
        match self {
            Language::Python => lang_meta!("Python", ["py", "pyw", "pyi"], ["python", "py"]),
            Language::Notebook => lang_meta!("Jupyter Notebook", ["ipynb"], ["notebook", "ipynb", "jupyter"]),
            Language::C => lang_meta!("C", ["c", "h"], ["c"]),
            Language::Cpp => lang_meta!("C++", ["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx", "h++"], ["cpp", "c++", "cxx"]),
            Language::Java => lang_meta!("Java", ["java"], ["java"]),
            Language::JavaScript => lang_meta!("JavaScript", ["js", "jsx", "mjs", "cjs"], ["javascript", "js", "jsx"]),
            Language::TypeScript => lang_meta!("TypeScript", ["ts", "tsx", "mts", "cts"], ["typescript", "ts", "tsx"]),
            Language::Go => lang_meta!("Go", ["go"], ["go", "golang"]),
            Language::Rust => lang_meta!("Rust", ["rs"], ["rust", "rs"]),
            Language::CSharp => lang_meta!("C#", ["cs"], ["csharp", "c#", "cs"]),
            Language::Php => lang_meta!("PHP", ["php"], ["php"]),
            Language::Ruby => lang_meta!("Ruby", ["rb"], ["ruby", "rb"]),
            Language::Swift => lang_meta!("Swift", ["swift"], ["swift"]),
            Language::Kotlin => lang_meta!("Kotlin", ["kt", "kts"], ["kotlin", "kt"]),
            Language::Scala => lang_meta!("Scala", ["scala", "sc"], ["scala"]),
            Language::Unknown => lang_meta!("Unknown", [], ["unknown", "text"]),
        }
    }
}

// =============================================================================
// Language Enum Definition
// =============================================================================

/// Languages the documentation pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Language {
    Python,
    /// Jupyter notebook; its code cells are fed through as Python text
    Notebook,
    C,
    Cpp,
    Java,
    JavaScript,
    TypeScript,
    Go,
    Rust,
    CSharp,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Scala,

    #[default]
    Unknown,
}

const ALL_KNOWN: &[Language] = &[
    Language::Python,
    Language::Notebook,
    Language::C,
    Language::Cpp,
    Language::Java,
    Language::JavaScript,
    Language::TypeScript,
    Language::Go,
    Language::Rust,
    Language::CSharp,
    Language::Php,
    Language::Ruby,
    Language::Swift,
    Language::Kotlin,
    Language::Scala,
];

impl Language {
    /// Display name (human-readable)
    pub fn as_str(&self) -> &'static str {
        self.meta().display_name
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        self.meta().extensions
    }

    /// Every recognized language, excluding `Unknown`
    pub fn all() -> &'static [Language] {
        ALL_KNOWN
    }

    /// Map a bare extension (no dot) to a language.
    pub fn from_extension(ext: &str) -> Self {
        let ext_lower = ext.to_lowercase();
        ALL_KNOWN
            .iter()
            .copied()
            .find(|lang| lang.meta().extensions.contains(&ext_lower.as_str()))
            .unwrap_or(Language::Unknown)
    }

    /// Classify a file name or path by its final dot-delimited suffix.
    pub fn classify(name: &str) -> Self {
        extension_of(name)
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Language::Unknown)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.to_lowercase();
        ALL_KNOWN
            .iter()
            .chain(std::iter::once(&Language::Unknown))
            .copied()
            .find(|lang| lang.meta().aliases.contains(&s_lower.as_str()))
            .ok_or_else(|| format!("Unknown language: {}", s))
    }
}

// =============================================================================
// Standalone Functions
// =============================================================================

/// Final dot-delimited suffix of the file-name component, if any.
fn extension_of(name: &str) -> Option<&str> {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Classify a file name. Returns `Language::Unknown` for unsupported names.
pub fn classify(name: &str) -> Language {
    Language::classify(name)
}

/// All supported extensions, lowercase and without the dot.
pub fn supported_extensions() -> Vec<&'static str> {
    ALL_KNOWN
        .iter()
        .flat_map(|lang| lang.extensions().iter().copied())
        .collect()
}

/// Pre-filter: would [`classify`] return a known language for this name?
pub fn is_supported(name: &str) -> bool {
    classify(name).is_known()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("ipynb"), Language::Notebook);
        assert_eq!(Language::from_extension("tsx"), Language::TypeScript);
        assert_eq!(Language::from_extension("jsx"), Language::JavaScript);
        assert_eq!(Language::from_extension("kt"), Language::Kotlin);
        assert_eq!(Language::from_extension("unknown"), Language::Unknown);
    }

    #[test]
    fn test_classify_paths() {
        assert_eq!(classify("src/main.rs"), Language::Rust);
        assert_eq!(classify("lib/Widget.Swift"), Language::Swift);
        assert_eq!(classify("include/vec.hpp"), Language::Cpp);
        assert_eq!(classify("include/vec.h"), Language::C);
        assert_eq!(classify("C:\\proj\\Program.cs"), Language::CSharp);
        assert_eq!(classify("archive.tar.gz"), Language::Unknown);
        assert_eq!(classify("notes.backup.py"), Language::Python);
    }

    #[test]
    fn test_no_dot_is_unknown() {
        assert_eq!(classify("Makefile"), Language::Unknown);
        assert_eq!(classify("src.d/README"), Language::Unknown);
        assert_eq!(classify("trailing."), Language::Unknown);
    }

    #[test]
    fn test_required_coverage() {
        for ext in [
            "py", "ipynb", "c", "h", "cpp", "hpp", "java", "js", "jsx", "ts", "tsx", "go", "rs",
            "cs", "php", "rb", "swift", "kt", "scala",
        ] {
            assert!(
                supported_extensions().contains(&ext),
                "missing extension {}",
                ext
            );
        }
    }

    #[test]
    fn test_extensions_are_unique_and_lowercase() {
        let exts = supported_extensions();
        let mut sorted = exts.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), exts.len());
        assert!(exts.iter().all(|e| *e == e.to_lowercase()));
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(Language::Cpp.to_string(), "C++");
        assert_eq!(Language::CSharp.to_string(), "C#");
        assert_eq!("golang".parse::<Language>(), Ok(Language::Go));
        assert_eq!("c#".parse::<Language>(), Ok(Language::CSharp));
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_metadata_consistency() {
        for lang in Language::all() {
            let meta = lang.meta();
            assert!(!meta.display_name.is_empty());
            assert!(!meta.extensions.is_empty(), "{:?} has no extensions", lang);
        }
    }

    proptest! {
        #[test]
        fn prop_supported_extension_classifies_known(
            idx in 0usize..41,
            stem in "[a-zA-Z_][a-zA-Z0-9_]{0,12}",
            upper in any::<bool>(),
        ) {
            let exts = supported_extensions();
            let ext = exts[idx % exts.len()];
            let ext = if upper { ext.to_uppercase() } else { ext.to_string() };
            let name = format!("{}.{}", stem, ext);
            let lang = classify(&name);
            prop_assert!(lang.is_known());
            prop_assert_eq!(lang, classify(&name));
        }

        #[test]
        fn prop_unrecognized_extension_is_unknown(stem in "[a-z]{1,8}", ext in "zz[a-z]{1,4}") {
            prop_assert_eq!(classify(&format!("{}.{}", stem, ext)), Language::Unknown);
        }
    }
}
