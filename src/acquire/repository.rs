use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;
use tracing::info;
use url::Url;

use super::{SourceTree, scratch_dir};
use crate::types::{AutodocError, Result};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ssh", "git", "file"];

/// `user@host:path/to/repo.git`
static SCP_LIKE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+:[\w./~-]+$").ok());

/// Reject anything git would not treat as a remote location.
pub fn validate_repository_url(url: &str) -> Result<()> {
    let url = url.trim();
    let invalid = |reason: &str| {
        Err(AutodocError::Acquisition(format!(
            "Invalid repository URL '{}': {}",
            url, reason
        )))
    };

    if url.is_empty() {
        return invalid("empty");
    }
    // Never let the location be read as a git option.
    if url.starts_with('-') {
        return invalid("must not start with '-'");
    }

    if let Ok(parsed) = Url::parse(url) {
        if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return invalid("unsupported scheme");
        }
        if parsed.scheme() != "file" && parsed.host_str().is_none_or(str::is_empty) {
            return invalid("missing host");
        }
        return Ok(());
    }

    if SCP_LIKE.as_ref().is_some_and(|re| re.is_match(url)) {
        return Ok(());
    }

    invalid("expected http(s), ssh, git, file or user@host:path")
}

/// Shallow-clone a repository into a fresh temporary directory.
///
/// A failed clone removes the partial checkout.
pub async fn clone_repository(url: &str) -> Result<SourceTree> {
    let url = url.trim();
    validate_repository_url(url)?;

    let temp = scratch_dir("autodocs-repo-")?;
    info!("Cloning {} (depth 1)", url);

    let output = Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg("--quiet")
        .arg("--")
        .arg(url)
        .arg(temp.path())
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| AutodocError::Acquisition(format!("Failed to spawn git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Dropping `temp` removes the partial checkout.
        return Err(AutodocError::Acquisition(format!(
            "git clone failed for {}: {}",
            url,
            stderr.trim()
        )));
    }

    Ok(SourceTree::temporary(temp))
}
