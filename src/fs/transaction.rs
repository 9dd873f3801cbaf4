//! Staged file updates committed together.
//!
//! The release rewrites the manifest and the documentation file. Both updates
//! are staged first, then written in one pass so that a failure half way
//! leaves neither file bumped.
//!
//! ## Execution Guarantees
//!
//! - **Atomic writes**: each file is written to a sibling temp file, then renamed over the original
//! - **All or nothing**: if a write fails, files already written are restored
//! - **Idempotency**: files with unchanged content are skipped
//!
//! ## Example
//!
//! ```no_run
//! # use release_bump::fs::Transaction;
//! # use std::path::PathBuf;
//! # fn example() -> release_bump::error::Result<()> {
//! let mut txn = Transaction::new(false);
//!
//! txn.update_file(PathBuf::from("Cargo.toml"), "version = \"1.3.0\"\n".into())?;
//! txn.update_file(PathBuf::from("README.md"), "enum-table = \"1.3\"\n".into())?;
//!
//! txn.commit()?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ReleaseError, Result};

use colored::Colorize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A staged file update.
#[derive(Debug, Clone)]
pub struct FileUpdate {
    pub path: PathBuf,
    /// Content at staging time, used for restore.
    pub original: String,
    pub new: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionState {
    /// Staging updates.
    Building,
    /// All updates written.
    Committed,
    /// Validation or a write failed.
    Failed,
}

/// Transaction coordinating the release's file updates.
///
/// ## Dry-Run Mode
///
/// When `dry_run = true`, updates are staged and reported but never written.
#[must_use = "Transaction must be committed"]
pub struct Transaction {
    updates: Vec<FileUpdate>,
    dry_run: bool,
    state: TransactionState,
    written: usize,
}

impl Transaction {
    pub fn new(dry_run: bool) -> Self {
        Self {
            updates: Vec::new(),
            dry_run,
            state: TransactionState::Building,
            written: 0,
        }
    }

    /// Stages a file update.
    ///
    /// Reads current content and compares to `new_content`. If identical,
    /// skips. Otherwise stages for commit.
    pub fn update_file(&mut self, path: PathBuf, new_content: String) -> Result<()> {
        if self.state != TransactionState::Building {
            return Err(ReleaseError::Other(anyhow::anyhow!(
                "Cannot modify transaction after commit"
            )));
        }

        let original = fs::read_to_string(&path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            ReleaseError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;

        if original == new_content {
            log::debug!("Content unchanged, skipping: {}", path.display());
            return Ok(());
        }

        if self.dry_run {
            log::info!("Would update: {}", path.display());
        } else {
            log::debug!("Staging update for: {}", path.display());
        }

        self.updates.push(FileUpdate {
            path,
            original,
            new: new_content,
        });
        Ok(())
    }

    /// Checks that every staged path is unique, still present and writable.
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for update in &self.updates {
            let path = &update.path;
            if !seen.insert(path) {
                return Err(ReleaseError::Other(anyhow::anyhow!(
                    "Duplicate file operation: {}",
                    path.display()
                )));
            }

            let metadata = fs::metadata(path).map_err(|e| {
                ReleaseError::Io(std::io::Error::new(
                    e.kind(),
                    format!("File no longer exists: {}", path.display()),
                ))
            })?;

            if metadata.permissions().readonly() {
                return Err(ReleaseError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("File is read-only: {}", path.display()),
                )));
            }
        }

        Ok(())
    }

    /// Writes every staged update.
    ///
    /// On a failed write, updates already written are restored and the
    /// original error is returned.
    pub fn commit(&mut self) -> Result<()> {
        if self.state != TransactionState::Building {
            return Err(ReleaseError::Other(anyhow::anyhow!(
                "Transaction already committed"
            )));
        }

        if self.dry_run {
            self.state = TransactionState::Committed;
            return Ok(());
        }

        if let Err(e) = self.validate() {
            self.state = TransactionState::Failed;
            return Err(e);
        }

        for idx in 0..self.updates.len() {
            let update = &self.updates[idx];
            if let Err(e) = write_atomic(&update.path, &update.new) {
                log::error!("Failed to write {}: {}", update.path.display(), e);
                self.state = TransactionState::Failed;
                if let Err(restore_err) = self.restore_written() {
                    log::error!("{}", restore_err);
                }
                return Err(e);
            }
            self.written = idx + 1;
            log::debug!("Updated: {}", update.path.display());
        }

        self.state = TransactionState::Committed;
        Ok(())
    }

    /// Restores written updates in reverse order.
    fn restore_written(&mut self) -> Result<()> {
        let mut errors = Vec::new();

        for update in self.updates[..self.written].iter().rev() {
            if let Err(e) = write_atomic(&update.path, &update.original) {
                errors.push(format!("Failed to restore {}: {}", update.path.display(), e));
            }
        }
        self.written = 0;

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReleaseError::Other(anyhow::anyhow!(
                "Restore failed: {}",
                errors.join("; ")
            )))
        }
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Prints the staged or written files, relative to `root`.
    pub fn print_summary(&self, root: &Path) {
        if self.updates.is_empty() {
            println!("\n{}", "No file changes needed".yellow());
            return;
        }

        if self.dry_run {
            println!("\n{}", "Files that would change:".yellow().bold());
        } else {
            println!("\n{}", "Files updated:".green().bold());
        }

        for update in &self.updates {
            let relative = pathdiff::diff_paths(&update.path, root)
                .unwrap_or_else(|| update.path.clone());
            let display = relative.to_string_lossy().replace('\\', "/");
            if self.dry_run {
                println!("   • {}", display.dimmed());
            } else {
                println!("   {} {}", "✓".green(), display.dimmed());
            }
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.state == TransactionState::Building && !self.updates.is_empty() && !self.dry_run {
            log::warn!("Transaction dropped without commit");
        }
    }
}

/// Writes `contents` to a sibling `.<name>.tmp` file, then renames it over `path`.
///
/// The original file's permissions are carried over.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("staged");
    let tmp_path = path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!(".{}.tmp", file_name));

    let result = (|| -> std::io::Result<()> {
        fs::write(&tmp_path, contents)?;
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(&tmp_path, metadata.permissions())?;
        }
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(ReleaseError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write {}: {}", path.display(), e),
        )));
    }

    Ok(())
}
