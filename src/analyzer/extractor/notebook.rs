//! Jupyter notebook code-cell extraction.

use serde_json::Value;

use super::{Extractor, Strategy};
use crate::types::{AutodocError, Categories, Result, SourceUnit, StructuralSummary};

const CELL_SEPARATOR: &str = "\n\n";

/// Concatenate the code cells of a notebook document.
///
/// Cells are joined with a blank line in document order and the result is
/// trimmed. A blank document yields an empty string; anything else that is
/// not JSON is a parse error. Both the nbformat 4 `cells` layout and the
/// older `worksheets[].cells[].input` layout are read.
pub fn notebook_code(path: &str, content: &str) -> Result<String> {
    if content.trim().is_empty() {
        return Ok(String::new());
    }

    let doc: Value = serde_json::from_str(content)
        .map_err(|e| AutodocError::parse(path, format!("Invalid notebook JSON: {}", e)))?;

    let cells: Vec<&Value> = match doc.get("cells").and_then(Value::as_array) {
        Some(cells) => cells.iter().collect(),
        None => doc
            .get("worksheets")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|ws| ws.get("cells").and_then(Value::as_array))
            .flatten()
            .collect(),
    };

    let code = cells
        .into_iter()
        .filter(|cell| cell.get("cell_type").and_then(Value::as_str) == Some("code"))
        .filter_map(|cell| cell.get("source").or_else(|| cell.get("input")))
        .map(cell_text)
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR);

    Ok(code.trim().to_string())
}

/// Cell source is either one string or a list of line strings.
fn cell_text(source: &Value) -> String {
    match source {
        Value::String(s) => s.clone(),
        Value::Array(lines) => lines.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}

/// Notebook path: code cells become the summary text, categories stay empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotebookExtractor;

impl Extractor for NotebookExtractor {
    fn summarize(&self, unit: &SourceUnit) -> Result<StructuralSummary> {
        let code = notebook_code(&unit.path, &unit.content)?;
        Ok(StructuralSummary::from_parts(
            &unit.path,
            unit.language,
            code,
            Categories::new(),
        ))
    }

    fn strategy(&self) -> Strategy {
        Strategy::Notebook
    }
}
