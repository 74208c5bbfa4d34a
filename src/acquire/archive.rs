use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use super::{SourceTree, scratch_dir};
use crate::types::{AutodocError, Result};

/// Unpack a `.zip` bundle into a fresh temporary directory.
///
/// Entries whose names would escape the extraction root are skipped.
pub fn extract_archive(path: impl AsRef<Path>) -> Result<SourceTree> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        AutodocError::Acquisition(format!("Cannot open archive {}: {}", path.display(), e))
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        AutodocError::Acquisition(format!("Invalid archive {}: {}", path.display(), e))
    })?;

    let temp = scratch_dir("autodocs-zip-")?;
    let root = temp.path();
    let mut extracted = 0usize;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            AutodocError::Acquisition(format!("Corrupt archive entry #{}: {}", i, e))
        })?;

        // enclosed_name rejects absolute paths and `..` traversal
        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping unsafe archive entry: {}", entry.name());
            continue;
        };
        let target = root.join(relative);

        if entry.is_dir() {
            create_dir(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        let mut out = File::create(&target).map_err(|e| {
            AutodocError::Acquisition(format!("Cannot create {}: {}", target.display(), e))
        })?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            AutodocError::Acquisition(format!("Failed to extract {}: {}", entry.name(), e))
        })?;
        extracted += 1;
        debug!("Extracted {}", target.display());
    }

    info!("Extracted {} files from {}", extracted, path.display());
    Ok(SourceTree::temporary(temp))
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        AutodocError::Acquisition(format!("Cannot create directory {}: {}", dir.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn build_zip(dir: &Path, entries: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join("bundle.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_extracts_nested_files() {
        let dir = TempDir::new().unwrap();
        let zip = build_zip(
            dir.path(),
            &[("proj/a.py", "def foo(): pass"), ("proj/src/b.rs", "fn baz() {}")],
        );

        let tree = extract_archive(&zip).unwrap();
        assert!(tree.is_temporary());
        let content = fs::read_to_string(tree.root().join("proj/src/b.rs")).unwrap();
        assert_eq!(content, "fn baz() {}");
    }

    #[test]
    fn test_skips_escaping_entries() {
        let dir = TempDir::new().unwrap();
        let zip = build_zip(dir.path(), &[("../evil.py", "x"), ("ok.py", "y")]);

        let tree = extract_archive(&zip).unwrap();
        assert!(tree.root().join("ok.py").exists());
        assert!(!tree.root().parent().unwrap().join("evil.py").exists());
    }

    #[test]
    fn test_corrupt_archive_is_acquisition_error() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.zip");
        fs::write(&bogus, b"definitely not a zip").unwrap();

        assert!(matches!(
            extract_archive(&bogus),
            Err(AutodocError::Acquisition(_))
        ));
        assert!(matches!(
            extract_archive(dir.path().join("missing.zip")),
            Err(AutodocError::Acquisition(_))
        ));
    }

    #[test]
    fn test_file_shadowing_directory_is_acquisition_error() {
        let dir = TempDir::new().unwrap();
        let zip = build_zip(dir.path(), &[("a", "plain file"), ("a/b.py", "x = 1")]);

        assert!(matches!(
            extract_archive(&zip),
            Err(AutodocError::Acquisition(_))
        ));
    }
}
