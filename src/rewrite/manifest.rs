//! Manifest version line lookup and rewrite.
//!
//! The manifest is treated as plain lines: the first line of the form
//! `version = "X.Y.Z"` holds the canonical version. Nothing else in the file is
//! parsed or touched, so comments, ordering and line endings survive.

use crate::error::{ReleaseError, Result};
use crate::fs::transaction::Transaction;
use crate::version::Version;
use regex::{NoExpand, Regex};
use std::path::Path;

/// Finds the current version in the manifest text.
///
/// Matches the first line that starts with `version = "X.Y.Z"`. Lines that
/// are indented, or carry any other value form, are ignored.
///
/// # Errors
///
/// `VersionNotFound` if no line matches.
pub fn current_version(manifest_path: &Path, content: &str) -> Result<String> {
    let pattern = Regex::new(r#"(?mR)^version = "(\d+\.\d+\.\d+)""#)?;

    pattern
        .captures(content)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ReleaseError::VersionNotFound(manifest_path.to_path_buf()))
}

/// Replaces the first full `version = "..."` line with the target version.
///
/// # Errors
///
/// `VersionLineNotRewritable` if no line consists of the version assignment
/// alone, e.g. when it carries a trailing comment.
pub fn replace_version_line(
    manifest_path: &Path,
    content: &str,
    target: &Version,
) -> Result<String> {
    let pattern = Regex::new(r#"(?mR)^version = ".+"$"#)?;
    if !pattern.is_match(content) {
        return Err(ReleaseError::VersionLineNotRewritable(manifest_path.to_path_buf()));
    }

    let line = format!(r#"version = "{}""#, target);
    Ok(pattern.replacen(content, 1, NoExpand(&line)).into_owned())
}

/// Stages the manifest rewrite in the transaction.
pub fn update_manifest_version(
    manifest_path: &Path,
    content: &str,
    target: &Version,
    txn: &mut Transaction,
) -> Result<()> {
    let updated = replace_version_line(manifest_path, content, target)?;
    log::info!(
        "Setting version {} in {}",
        target,
        manifest_path.display()
    );
    txn.update_file(manifest_path.to_path_buf(), updated)
}
