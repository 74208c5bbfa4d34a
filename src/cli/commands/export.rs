//! Export Command
//!
//! Render an existing markdown report to PDF.
//!
//! Usage:
//!   autodocs export-pdf [--input <md>] [--output <dir>]

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::docs::render_pdf;
use crate::types::{AutodocError, Result};

/// Defaults come from `[export]`: `<output_dir>/<markdown_file>` in, `<output_dir>` out.
pub fn run(input: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    let config = ConfigLoader::load()?;
    let default_dir = PathBuf::from(&config.export.output_dir);

    let input = input.unwrap_or_else(|| default_dir.join(&config.export.markdown_file));
    let output_dir = output_dir.unwrap_or(default_dir);

    let pdf_path = export_file(&input, &output_dir, &config.export.pdf_prefix)?;
    Output::new().success(&format!("PDF saved to {}", pdf_path.display()));
    Ok(())
}

/// Read a markdown report and write a freshly named PDF beside the other exports.
pub fn export_file(input: &Path, output_dir: &Path, prefix: &str) -> Result<PathBuf> {
    if !input.is_file() {
        return Err(AutodocError::Render(format!(
            "Markdown report not found: {}",
            input.display()
        )));
    }
    let markdown = fs::read_to_string(input)?;
    render_pdf(&markdown, output_dir, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("auto_docs.md");
        fs::write(&input, "\n\n### a.py\n\n#### Architect Agent\nLayered design.\n").unwrap();

        let pdf = export_file(&input, dir.path(), "auto_docs").unwrap();
        assert!(pdf.starts_with(dir.path()));
        assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_input_is_render_error() {
        let dir = TempDir::new().unwrap();
        let err = export_file(&dir.path().join("nope.md"), dir.path(), "auto_docs").unwrap_err();
        assert!(matches!(err, AutodocError::Render(_)));
    }
}
