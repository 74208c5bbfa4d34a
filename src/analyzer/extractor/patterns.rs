//! Approximate extraction via per-language regex rule tables.
//!
//! Rules are data: each language lists, per category, the patterns whose
//! first capture group is an identifier. Patterns are deliberately loose.
//! They over-match (control statements shaped like declarations, call sites)
//! and under-match (multi-line signatures, templates, attributes). The output
//! is a hint for the LLM, so no attempt is made to tighten them.
//!
//! Tables are independent: a broken table only disables its own language.

use regex::Regex;

use super::{Extractor, Strategy};
use crate::analyzer::language::Language;
use crate::types::source::{CLASSES, FUNCTIONS, INTERFACES, MODULES, PROTOCOLS, TRAITS};
use crate::types::{AutodocError, Categories, Result, SourceUnit, StructuralSummary};

/// Patterns feeding one category
#[derive(Debug)]
pub struct PatternRule {
    pub category: &'static str,
    pub patterns: &'static [&'static str],
}

/// Complete rule set for one language
#[derive(Debug)]
pub struct LanguageRules {
    pub language: Language,
    pub rules: &'static [PatternRule],
}

macro_rules! rule {
    ($category:expr, [$($pattern:expr),+ $(,)?]) => {
        PatternRule {
            category: $category,
            patterns: &[$($pattern),+],
        }
    };
}

// Shared by JavaScript and TypeScript
const JS_FUNCTION_KEYWORD: &str = r"\bfunction\b\s*\*?\s*(\w+)\s*[<(]";
const JS_CLASS: &str = r"\bclass\s+(\w+)";

pub static RULE_TABLES: &[LanguageRules] = &[
    LanguageRules {
        language: Language::C,
        rules: &[
            rule!(FUNCTIONS, [r"(\w+)\s*\([^)]*\)\s*\{"]),
            rule!(CLASSES, [
                r"\bstruct\s+(\w+)",
                r"\btypedef\s+struct\s*\w*\s*\{[^}]*\}\s*(\w+)\s*;",
            ]),
        ],
    },
    LanguageRules {
        language: Language::Cpp,
        rules: &[
            rule!(FUNCTIONS, [
                r"(\w+)\s*\([^)]*\)\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?(?:final\s*)?\{",
            ]),
            rule!(CLASSES, [r"\b(?:class|struct)\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::Java,
        rules: &[
            rule!(FUNCTIONS, [
                r"(?m)^\s*(?:(?:public|protected|private|static|final|abstract|synchronized|native|default)\s+)*(?:<[^>]*>\s*)?[\w<>\[\]?,.]+\s+(\w+)\s*\([^)]*\)\s*(?:throws\s+[\w.,\s]+)?\{",
                r"(?m)^\s*(?:public|protected|private)\s+(\w+)\s*\([^)]*\)\s*(?:throws\s+[\w.,\s]+)?\{",
            ]),
            rule!(CLASSES, [r"\b(?:class|enum|record)\s+(\w+)"]),
            rule!(INTERFACES, [r"\binterface\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::JavaScript,
        rules: &[
            rule!(FUNCTIONS, [
                JS_FUNCTION_KEYWORD,
                r"\b(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:function\b|(?:\([^)]*\)|\w+)\s*=>)",
                r"(?m)^\s*(?:static\s+)?(?:async\s+)?(?:get\s+|set\s+)?\*?\s*(\w+)\s*\([^)]*\)\s*\{",
            ]),
            rule!(CLASSES, [JS_CLASS]),
        ],
    },
    LanguageRules {
        language: Language::TypeScript,
        rules: &[
            rule!(FUNCTIONS, [
                JS_FUNCTION_KEYWORD,
                r"\b(?:const|let|var)\s+(\w+)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|(?:\([^)]*\)|\w+)\s*(?::[^=]+)?=>)",
                r"(?m)^\s*(?:(?:public|private|protected|static|readonly|abstract|override|async)\s+)*(\w+)\s*(?:<[^>]*>)?\([^)]*\)\s*(?::\s*[^{;]+)?\{",
            ]),
            rule!(CLASSES, [JS_CLASS]),
            rule!(INTERFACES, [r"\binterface\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::Go,
        rules: &[
            rule!(FUNCTIONS, [r"(?m)^func\s+(?:\([^)]*\)\s*)?(\w+)"]),
            rule!(CLASSES, [r"(?m)^\s*(?:type\s+)?(\w+)\s+struct\s*\{"]),
            rule!(INTERFACES, [r"(?m)^\s*(?:type\s+)?(\w+)\s+interface\s*\{"]),
        ],
    },
    LanguageRules {
        language: Language::Rust,
        rules: &[
            rule!(FUNCTIONS, [r"\bfn\s+(\w+)"]),
            rule!(CLASSES, [r"\b(?:struct|enum|union)\s+(\w+)"]),
            rule!(TRAITS, [r"\btrait\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::CSharp,
        rules: &[
            rule!(FUNCTIONS, [
                r"(?m)^\s*(?:(?:public|private|protected|internal|static|virtual|override|abstract|async|sealed|extern|unsafe|new|partial|readonly)\s+)*[\w<>\[\],.?]+\s+(\w+)\s*(?:<[^>]*>)?\([^)]*\)\s*(?:where\s+[^{]+)?(?:\{|=>)",
            ]),
            rule!(CLASSES, [r"\b(?:class|struct|record|enum)\s+(\w+)"]),
            rule!(INTERFACES, [r"\binterface\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::Php,
        rules: &[
            rule!(FUNCTIONS, [r"\bfunction\s+&?\s*(\w+)\s*\("]),
            rule!(CLASSES, [r"\b(?:class|enum)\s+(\w+)"]),
            rule!(INTERFACES, [r"\binterface\s+(\w+)"]),
            rule!(TRAITS, [r"\btrait\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::Ruby,
        rules: &[
            rule!(FUNCTIONS, [r"(?m)^\s*def\s+(?:self\.)?(\w+[?!=]?)"]),
            rule!(CLASSES, [r"(?m)^\s*class\s+([A-Z][\w:]*)"]),
            rule!(MODULES, [r"(?m)^\s*module\s+([A-Z][\w:]*)"]),
        ],
    },
    LanguageRules {
        language: Language::Swift,
        rules: &[
            rule!(FUNCTIONS, [r"\bfunc\s+(\w+)"]),
            rule!(CLASSES, [r"\b(?:class|struct|enum|actor)\s+([A-Z]\w*)"]),
            rule!(PROTOCOLS, [r"\bprotocol\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::Kotlin,
        rules: &[
            rule!(FUNCTIONS, [r"\bfun\s+(?:<[^>]*>\s*)?(?:[\w.]+\.)?(\w+)\s*\("]),
            rule!(CLASSES, [r"\b(?:class|object)\s+(\w+)"]),
            rule!(INTERFACES, [r"\binterface\s+(\w+)"]),
        ],
    },
    LanguageRules {
        language: Language::Scala,
        rules: &[
            rule!(FUNCTIONS, [r"\bdef\s+(\w+)"]),
            rule!(CLASSES, [r"\b(?:class|object)\s+(\w+)"]),
            rule!(TRAITS, [r"\btrait\s+(\w+)"]),
        ],
    },
];

/// Rule table for a language, if one exists
pub fn rules_for(language: Language) -> Option<&'static LanguageRules> {
    RULE_TABLES.iter().find(|t| t.language == language)
}

/// Compiled form of a [`LanguageRules`] table
pub struct PatternExtractor {
    compiled: Vec<(&'static str, Vec<Regex>)>,
}

impl PatternExtractor {
    pub fn new(table: &LanguageRules) -> Result<Self> {
        let compiled = table
            .rules
            .iter()
            .map(|rule| {
                let regexes = rule
                    .patterns
                    .iter()
                    .map(|p| {
                        Regex::new(p).map_err(|e| {
                            AutodocError::Config(format!(
                                "Invalid {} pattern for {}: {}",
                                rule.category, table.language, e
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((rule.category, regexes))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { compiled })
    }

    pub fn extract(&self, content: &str) -> Categories {
        let mut categories = Categories::new();

        for (category, regexes) in &self.compiled {
            categories.declare(category);
            for re in regexes {
                for cap in re.captures_iter(content) {
                    if let Some(name) = cap.get(1) {
                        categories.insert(category, name.as_str());
                    }
                }
            }
        }

        categories
    }
}

impl Extractor for PatternExtractor {
    fn summarize(&self, unit: &SourceUnit) -> Result<StructuralSummary> {
        Ok(StructuralSummary::new(unit, self.extract(&unit.content)))
    }

    fn strategy(&self) -> Strategy {
        Strategy::Approximate
    }
}
