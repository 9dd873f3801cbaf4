//! Documentation snippet rewriting.
//!
//! Keeps dependency examples in the README in step with the released
//! version. Snippets carry only `major.minor`:
//!
//! ```toml
//! enum-table = "1.2"
//! enum-table = { version = "1.2", features = ["serde"] }
//! ```
//!
//! Only the quoted version is replaced; the rest of each line is untouched.

use crate::error::Result;
use crate::fs::transaction::Transaction;
use crate::version::Version;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

/// Compiled patterns for one dependency name.
pub struct SnippetPatterns {
    bare: Regex,
    table: Regex,
}

impl SnippetPatterns {
    pub fn new(crate_name: &str) -> Result<Self> {
        let name = regex::escape(crate_name);
        Ok(Self {
            bare: Regex::new(&format!(r#"({} = )"\d+\.\d+""#, name))?,
            table: Regex::new(&format!(r#"({} = \{{ version = )"\d+\.\d+""#, name))?,
        })
    }

    /// Rewrites every snippet in `content` to `major_minor`.
    pub fn apply(&self, content: &str, major_minor: &str) -> String {
        let replace = |caps: &Captures| format!(r#"{}"{}""#, &caps[1], major_minor);

        let content = self.bare.replace_all(content, replace);
        self.table.replace_all(&content, replace).into_owned()
    }
}

/// Stages the documentation rewrite, if the file exists.
///
/// Returns `false` (after logging a warning) when the file is absent. This is
/// the only missing file the release tolerates.
pub fn update_docs(
    readme_path: &Path,
    crate_name: &str,
    target: &Version,
    txn: &mut Transaction,
) -> Result<bool> {
    if !readme_path.exists() {
        log::warn!(
            "{} not found, skipping documentation update.",
            readme_path.display()
        );
        return Ok(false);
    }

    let content = fs::read_to_string(readme_path)?;
    let patterns = SnippetPatterns::new(crate_name)?;
    let updated = patterns.apply(&content, &target.major_minor());

    log::info!(
        "Setting {} snippets to {} in {}",
        crate_name,
        target.major_minor(),
        readme_path.display()
    );
    txn.update_file(readme_path.to_path_buf(), updated)?;
    Ok(true)
}
