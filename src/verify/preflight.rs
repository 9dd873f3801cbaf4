//! Pre-flight checks performed before the release touches anything.
//!
//! Unlike `rules`, these functions may perform I/O.

use crate::error::{ReleaseError, Result};
use crate::version::{Comparison, Version};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Reads the manifest as text.
///
/// # Errors
///
/// - `ManifestNotFound` if the file does not exist
/// - `ManifestRead` for any other read failure (permissions, invalid UTF-8)
pub fn read_manifest(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ReleaseError::ManifestNotFound(path.to_path_buf()));
    }

    fs::read_to_string(path).map_err(|e| {
        log::error!("Failed to read {}: {}", path.display(), e);
        ReleaseError::ManifestRead {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Ensures `target` is strictly greater than `current`.
///
/// With [`Comparison::Lexical`] the check is a plain string comparison, which
/// rejects valid upgrades such as `1.2.3` -> `1.2.10`.
pub fn check_version_order(current: &str, target: &Version, comparison: Comparison) -> Result<()> {
    let target = target.to_string();

    if comparison.compare(current, &target)? != Ordering::Less {
        log::debug!(
            "Rejecting {} -> {} ({:?} comparison)",
            current,
            target,
            comparison
        );
        return Err(ReleaseError::NotNewer {
            current: current.to_string(),
            target,
        });
    }

    Ok(())
}
