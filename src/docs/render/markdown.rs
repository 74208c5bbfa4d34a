use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::{ProjectReport, Result};

/// Serialize a report: `### <file>` per file, `#### <persona>` per fragment,
/// fragment text verbatim.
pub fn render_markdown(report: &ProjectReport) -> String {
    let mut out = String::new();
    for bundle in report.bundles() {
        out.push_str(&format!("\n\n### {}\n", bundle.file));
        for fragment in bundle.fragments() {
            out.push_str(&format!("\n#### {}\n{}\n", fragment.persona, fragment.text));
        }
    }
    out
}

/// Write markdown to `<output_dir>/<file_name>`, replacing any previous export.
pub fn write_markdown(markdown: &str, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(file_name);
    fs::write(&path, markdown)?;
    info!("Saved markdown report to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::language::Language;
    use crate::types::{DocumentFragment, FileDocumentBundle};
    use tempfile::TempDir;

    fn report() -> ProjectReport {
        let mut report = ProjectReport::new();
        for file in ["a.py", "src/b.rs"] {
            let mut bundle = FileDocumentBundle::new(file, Language::classify(file));
            bundle.insert(DocumentFragment::new("Architect Agent", "Layered."));
            bundle.insert(DocumentFragment::new("User Agent", "It adds numbers."));
            report.insert(bundle);
        }
        report
    }

    #[test]
    fn test_layout() {
        let md = render_markdown(&report());
        assert!(md.starts_with("\n\n### a.py\n\n#### Architect Agent\nLayered.\n"));
        let a = md.find("### a.py").unwrap();
        let b = md.find("### src/b.rs").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render_markdown(&ProjectReport::new()), "");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("docs");

        let path = write_markdown("first run, much longer text", &out, "auto_docs.md").unwrap();
        write_markdown("second", &out, "auto_docs.md").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }
}
