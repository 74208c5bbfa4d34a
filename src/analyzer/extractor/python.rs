use tree_sitter::{Query, QueryCursor, StreamingIterator};

use super::{Extractor, Strategy};
use crate::types::source::{CLASSES, FUNCTIONS};
use crate::types::{AutodocError, Categories, Result, SourceUnit, StructuralSummary};

/// Every `def`/`async def` (module level, methods, nested) and every `class`.
const DEFINITIONS_QUERY: &str = r#"
    (function_definition
        name: (identifier) @function
    )
    (class_definition
        name: (identifier) @class
    )
"#;

/// Python 2 statement forms the grammar still accepts.
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Exact extractor backed by the tree-sitter Python grammar.
pub struct PythonExtractor {
    language: tree_sitter::Language,
    query: Query,
}

impl PythonExtractor {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let query = Query::new(&language, DEFINITIONS_QUERY).map_err(|e| AutodocError::Parse {
            message: format!("Invalid Python definitions query: {}", e),
            path: String::new(),
        })?;
        Ok(Self { language, query })
    }

    fn create_parser(&self, path: &str) -> Result<tree_sitter::Parser> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| AutodocError::parse(path, format!("Failed to set Python language: {}", e)))?;
        Ok(parser)
    }

    /// Collect definition names, rejecting sources with syntax errors.
    pub fn extract(&self, path: &str, content: &str) -> Result<Categories> {
        let mut parser = self.create_parser(path)?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| AutodocError::parse(path, "Failed to parse Python file"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(AutodocError::parse(path, "Python source contains syntax errors"));
        }
        if has_legacy_statement(root) {
            return Err(AutodocError::parse(path, "Python 2 syntax is not supported"));
        }

        let mut categories = Categories::new();
        let capture_names = self.query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, root, content.as_bytes());

        while let Some(m) = matches.next() {
            for cap in m.captures.iter() {
                let Ok(name) = cap.node.utf8_text(content.as_bytes()) else {
                    continue;
                };
                match capture_names[cap.index as usize] {
                    "function" => categories.insert(FUNCTIONS, name),
                    "class" => categories.insert(CLASSES, name),
                    _ => {}
                }
            }
        }

        Ok(categories)
    }
}

fn has_legacy_statement(root: tree_sitter::Node) -> bool {
    let mut cursor = root.walk();
    loop {
        if LEGACY_STATEMENTS.contains(&cursor.node().kind()) {
            return true;
        }
        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return false;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

impl Extractor for PythonExtractor {
    fn summarize(&self, unit: &SourceUnit) -> Result<StructuralSummary> {
        let categories = self.extract(&unit.path, &unit.content)?;
        Ok(StructuralSummary::new(unit, categories))
    }

    fn strategy(&self) -> Strategy {
        Strategy::Exact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_top_level_and_nested_definitions() {
        let source = r#"
import os

def top_level(a, b=1):
    def inner():
        return a
    return inner

class Outer(Base):
    class Inner:
        def method(self):
            pass

    @staticmethod
    def decorated():
        pass

    async def fetch(self):
        return await os.getenv("X")

@dataclass
class Point:
    x: int
"#;
        let extractor = PythonExtractor::new().unwrap();
        let categories = extractor.extract("mod.py", source).unwrap();

        assert_eq!(
            names(&categories.functions),
            vec!["decorated", "fetch", "inner", "method", "top_level"]
        );
        assert_eq!(names(&categories.classes), vec!["Inner", "Outer", "Point"]);
        assert!(categories.extras.is_empty());
    }

    #[test]
    fn test_no_false_positives_from_calls_or_strings() {
        let source = r#"
result = compute(1, 2)
text = "def fake(): pass"
# class Commented:
handler = lambda x: x
if ready():
    run()
"#;
        let extractor = PythonExtractor::new().unwrap();
        let categories = extractor.extract("script.py", source).unwrap();

        assert!(categories.functions.is_empty());
        assert!(categories.classes.is_empty());
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let source = "class A:\n    def run(self): pass\n\nclass B:\n    def run(self): pass\n";
        let extractor = PythonExtractor::new().unwrap();
        let categories = extractor.extract("dup.py", source).unwrap();

        assert_eq!(names(&categories.functions), vec!["run"]);
        assert_eq!(names(&categories.classes), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_source_is_not_an_error() {
        let extractor = PythonExtractor::new().unwrap();
        let categories = extractor.extract("empty.py", "").unwrap();
        assert!(categories.functions.is_empty());
        assert!(categories.classes.is_empty());
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let extractor = PythonExtractor::new().unwrap();
        let result = extractor.extract("bad.py", "class Broken(:\n    def\n");
        assert!(matches!(result, Err(AutodocError::Parse { .. })));
    }

    #[test]
    fn test_python2_statements_are_rejected() {
        let extractor = PythonExtractor::new().unwrap();
        for source in ["print \"x\"\ndef z(): pass\n", "exec \"x = 1\"\ndef z(): pass\n"] {
            let result = extractor.extract("legacy.py", source);
            assert!(matches!(result, Err(AutodocError::Parse { .. })), "{}", source);
        }
    }

    #[test]
    fn test_print_call_is_accepted() {
        let extractor = PythonExtractor::new().unwrap();
        let categories = extractor
            .extract("modern.py", "print(\"x\")\ndef z():\n    pass\n")
            .unwrap();
        assert_eq!(names(&categories.functions), vec!["z"]);
    }
}
