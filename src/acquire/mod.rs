//! Source Acquisition
//!
//! Produces a walkable directory tree from an uploaded archive, a remote
//! repository, or an existing local directory. Acquisition is atomic: it
//! either hands back a complete tree or fails with
//! [`AutodocError::Acquisition`](crate::types::AutodocError::Acquisition),
//! leaving nothing behind.

pub mod archive;
pub mod repository;

pub use archive::extract_archive;
pub use repository::{clone_repository, validate_repository_url};

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::types::{AutodocError, Result};

/// A directory of source files, possibly owning a temporary checkout.
///
/// Temporary trees are deleted when the value is dropped.
#[derive(Debug)]
pub struct SourceTree {
    root: PathBuf,
    _temp: Option<TempDir>,
}

impl SourceTree {
    /// Wrap an existing directory without taking ownership of it.
    pub fn local(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(AutodocError::Acquisition(format!(
                "Not a directory: {}",
                root.display()
            )));
        }
        Ok(Self { root, _temp: None })
    }

    pub(crate) fn temporary(temp: TempDir) -> Self {
        Self {
            root: temp.path().to_path_buf(),
            _temp: Some(temp),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_temporary(&self) -> bool {
        self._temp.is_some()
    }
}

pub(crate) fn scratch_dir(prefix: &str) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .map_err(|e| AutodocError::Acquisition(format!("Failed to create temp directory: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_tree_is_not_owned() {
        let dir = TempDir::new().unwrap();
        let tree = SourceTree::local(dir.path()).unwrap();
        assert!(!tree.is_temporary());
        drop(tree);
        assert!(dir.path().exists());
    }

    #[test]
    fn test_local_tree_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        std::fs::write(&file, "x = 1").unwrap();
        assert!(matches!(
            SourceTree::local(&file),
            Err(AutodocError::Acquisition(_))
        ));
    }

    #[test]
    fn test_temporary_tree_removed_on_drop() {
        let tree = SourceTree::temporary(scratch_dir("autodocs-test-").unwrap());
        let root = tree.root().to_path_buf();
        assert!(tree.is_temporary());
        assert!(root.exists());
        drop(tree);
        assert!(!root.exists());
    }
}
