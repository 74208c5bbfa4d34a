use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analyzer::language;
use crate::types::{AutodocError, Result, SourceUnit};

/// Default maximum file size for analysis (1MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = crate::constants::analysis::MAX_FILE_SIZE;

/// Default directories to skip
const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    "target",
    ".git",
    "build",
    "dist",
    "__pycache__",
    "vendor",
    ".venv",
    ".ipynb_checkpoints",
];

/// Walks a tree and reads every supported source file into a [`SourceUnit`].
pub struct FileScanner {
    root: PathBuf,
    exclude: Vec<glob::Pattern>,
    max_file_size: u64,
}

impl FileScanner {
    /// Scanner with default skip directories and size limit
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let exclude = DEFAULT_SKIP_DIRS
            .iter()
            .flat_map(|d| [format!("{}/**", d), format!("**/{}/**", d)])
            .filter_map(|p| glob::Pattern::new(&p).ok())
            .collect();
        Self {
            root: root.as_ref().to_path_buf(),
            exclude,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Add exclude globs, matched against `/`-separated relative paths.
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            let compiled = glob::Pattern::new(pattern).map_err(|e| {
                AutodocError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
            self.exclude.push(compiled);
        }
        Ok(self)
    }

    /// Zero disables the limit.
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative identifiers of every file that would be read, in discovery order.
    pub fn paths(&self) -> Result<Vec<String>> {
        Ok(self.candidates()?.into_iter().map(|(id, _)| id).collect())
    }

    /// Read every supported file, in discovery order.
    ///
    /// Unreadable or non-UTF-8 files are skipped, never fatal.
    pub fn scan(&self) -> Result<Vec<SourceUnit>> {
        let mut units = Vec::new();

        for (id, path) in self.candidates()? {
            match std::fs::read(&path) {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(content) => units.push(SourceUnit::new(id, content)),
                    Err(_) => debug!("Skipping non-UTF-8 file: {}", id),
                },
                Err(e) => debug!("Skipping unreadable file {}: {}", id, e),
            }
        }

        debug!("Discovered {} source files under {}", units.len(), self.root.display());
        Ok(units)
    }

    fn candidates(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.root.is_dir() {
            return Err(AutodocError::Acquisition(format!(
                "Not a directory: {}",
                self.root.display()
            )));
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            // Classifier pre-filter: never open files that would be skipped.
            let supported = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(language::is_supported);
            if !supported {
                continue;
            }

            let Some(id) = self.relative_id(path) else {
                continue;
            };

            if self.should_exclude(&id) {
                continue;
            }

            if !self.check_size(path) {
                debug!("Skipping oversized file: {}", id);
                continue;
            }

            files.push((id, path.to_path_buf()));
        }

        Ok(files)
    }

    fn relative_id(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Some(parts.join("/"))
    }

    fn should_exclude(&self, id: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(id))
    }

    fn check_size(&self, path: &Path) -> bool {
        if self.max_file_size == 0 {
            return true;
        }
        path.metadata()
            .map(|m| m.len() <= self.max_file_size)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::language::Language;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.rs", b"pub fn baz() {}");
        write(dir.path(), "a.py", b"def foo(): pass");
        write(dir.path(), "README.md", b"# readme");
        write(dir.path(), "src/lib/Main.JAVA", b"class Main {}");
        write(dir.path(), "src/app.ts", b"export class App {}");
        write(dir.path(), "node_modules/pkg/index.js", b"function x() {}");
        write(dir.path(), "Makefile", b"all:");
        dir
    }

    #[test]
    fn test_discovery_is_sorted_and_filtered() {
        let dir = project();
        let paths = FileScanner::new(dir.path()).paths().unwrap();

        assert_eq!(paths, vec!["a.py", "b.rs", "src/app.ts", "src/lib/Main.JAVA"]);
    }

    #[test]
    fn test_scan_reads_units() {
        let dir = project();
        let units = FileScanner::new(dir.path()).scan().unwrap();

        assert_eq!(units.len(), 4);
        assert_eq!(units[0].path, "a.py");
        assert_eq!(units[0].language, Language::Python);
        assert_eq!(units[0].content, "def foo(): pass");
        assert_eq!(units[3].language, Language::Java);
    }

    #[test]
    fn test_exclude_globs() {
        let dir = project();
        let paths = FileScanner::new(dir.path())
            .with_exclude(&["src/**".to_string()])
            .unwrap()
            .paths()
            .unwrap();

        assert_eq!(paths, vec!["a.py", "b.rs"]);
    }

    #[test]
    fn test_invalid_exclude_glob() {
        let dir = project();
        assert!(
            FileScanner::new(dir.path())
                .with_exclude(&["[".to_string()])
                .is_err()
        );
    }

    #[test]
    fn test_size_limit_and_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "big.py", &vec![b'#'; 64]);
        write(dir.path(), "bin.c", &[0xff, 0xfe, 0x00]);
        write(dir.path(), "ok.go", b"package main");

        let units = FileScanner::new(dir.path())
            .with_max_file_size(32)
            .scan()
            .unwrap();
        let ids: Vec<_> = units.iter().map(|u| u.path.as_str()).collect();
        assert_eq!(ids, vec!["ok.go"]);

        let unlimited = FileScanner::new(dir.path()).with_max_file_size(0).scan().unwrap();
        assert_eq!(unlimited.len(), 2);
    }

    #[test]
    fn test_empty_files_are_discovered() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "empty.py", b"");
        let units = FileScanner::new(dir.path()).scan().unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].content.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(FileScanner::new(missing).scan().is_err());
    }
}
