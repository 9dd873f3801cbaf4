//! Release configuration.
//!
//! Resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults (`enum-table`, `enum-table-derive`, `origin`, `main`)
//! 2. `[workspace.metadata.release]` or `[package.metadata.release]` in the manifest
//! 3. Command-line flags
//!
//! ```toml
//! [workspace.metadata.release]
//! crates = ["enum-table", "enum-table-derive"]
//! branch = "main"
//! remote = "origin"
//! readme = "README.md"
//! docs-crate = "enum-table"
//! ```

use crate::cli::ReleaseArgs;
use crate::error::{ReleaseError, Result};
use crate::version::Comparison;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item};

pub const DEFAULT_CRATES: &[&str] = &["enum-table", "enum-table-derive"];
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_README: &str = "README.md";
pub const STATE_FILE: &str = "target/release-bump-state.json";

/// Everything the release driver needs besides the target version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    pub manifest_path: PathBuf,
    pub readme_path: PathBuf,
    /// Packages tagged and published, in this order.
    pub crates: Vec<String>,
    /// Dependency name used in the documentation snippets.
    pub docs_crate: String,
    pub branch: String,
    pub remote: String,
    pub comparison: Comparison,
    pub publish: bool,
    pub dry_run: bool,
}

/// Values read from a `metadata.release` table. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ManifestOverrides {
    crates: Option<Vec<String>>,
    docs_crate: Option<String>,
    branch: Option<String>,
    remote: Option<String>,
    readme: Option<PathBuf>,
}

impl ReleaseConfig {
    /// Builds the configuration from defaults only.
    pub fn with_defaults(manifest_path: impl Into<PathBuf>) -> Self {
        let manifest_path = manifest_path.into();
        let readme_path = manifest_dir(&manifest_path).join(DEFAULT_README);
        let crates: Vec<String> = DEFAULT_CRATES.iter().map(|s| s.to_string()).collect();

        Self {
            manifest_path,
            readme_path,
            docs_crate: crates[0].clone(),
            crates,
            branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            comparison: Comparison::Numeric,
            publish: true,
            dry_run: false,
        }
    }

    /// Resolves the configuration for a run.
    ///
    /// `manifest_content` is the already-read manifest text. A manifest that is
    /// not valid TOML is tolerated (the version line is located by pattern, not
    /// by parsing); only a malformed release table is an error.
    pub fn resolve(args: &ReleaseArgs, manifest_content: &str) -> Result<Self> {
        let mut config = Self::with_defaults(&args.manifest_path);

        match manifest_content.parse::<DocumentMut>() {
            Ok(doc) => {
                let overrides = read_overrides(&doc)?;
                config.apply_overrides(overrides);
            }
            Err(e) => {
                log::warn!(
                    "{} is not valid TOML, using default release settings: {}",
                    config.manifest_path.display(),
                    e
                );
            }
        }

        if !args.crates.is_empty() {
            config.crates = args.crates.clone();
            config.docs_crate = config.crates[0].clone();
        }
        if let Some(readme) = &args.readme {
            config.readme_path = readme.clone();
        }
        if let Some(branch) = &args.branch {
            config.branch = branch.clone();
        }
        if let Some(remote) = &args.remote {
            config.remote = remote.clone();
        }
        if args.lexical_compare {
            config.comparison = Comparison::Lexical;
        }
        config.publish = !args.no_publish;
        config.dry_run = args.dry_run;

        config.validate()?;
        log::debug!("Resolved release configuration: {:?}", config);
        Ok(config)
    }

    /// Directory holding the manifest. Git and cargo run here.
    pub fn root(&self) -> &Path {
        manifest_dir(&self.manifest_path)
    }

    /// Location of the resume cursor, under the manifest's `target/` directory
    /// so that it never shows up as an uncommitted change.
    pub fn state_path(&self) -> PathBuf {
        self.root().join(STATE_FILE)
    }

    fn apply_overrides(&mut self, overrides: ManifestOverrides) {
        if let Some(crates) = overrides.crates {
            self.docs_crate = crates[0].clone();
            self.crates = crates;
        }
        if let Some(docs_crate) = overrides.docs_crate {
            self.docs_crate = docs_crate;
        }
        if let Some(branch) = overrides.branch {
            self.branch = branch;
        }
        if let Some(remote) = overrides.remote {
            self.remote = remote;
        }
        if let Some(readme) = overrides.readme {
            self.readme_path = manifest_dir(&self.manifest_path).join(readme);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.crates.is_empty() {
            return Err(ReleaseError::Config("crate list is empty".to_string()));
        }
        for name in self.crates.iter().chain([&self.branch, &self.remote]) {
            if name.trim().is_empty() || name.starts_with('-') {
                return Err(ReleaseError::Config(format!("invalid name '{}'", name)));
            }
        }
        Ok(())
    }
}

fn manifest_dir(manifest_path: &Path) -> &Path {
    manifest_path.parent().unwrap_or_else(|| Path::new(""))
}

fn release_table(doc: &DocumentMut) -> Option<&Item> {
    ["workspace", "package"].iter().find_map(|root| {
        doc.get(root)
            .and_then(|t| t.get("metadata"))
            .and_then(|t| t.get("release"))
    })
}

fn read_overrides(doc: &DocumentMut) -> Result<ManifestOverrides> {
    let Some(table) = release_table(doc) else {
        return Ok(ManifestOverrides::default());
    };

    let string_key = |key: &str| -> Result<Option<String>> {
        match table.get(key) {
            None => Ok(None),
            Some(item) => item
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| ReleaseError::Config(format!("`{}` must be a string", key))),
        }
    };

    let crates = match table.get("crates") {
        None => None,
        Some(item) => {
            let array = item
                .as_array()
                .ok_or_else(|| ReleaseError::Config("`crates` must be an array".to_string()))?;
            let names = array
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        ReleaseError::Config("`crates` entries must be strings".to_string())
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            if names.is_empty() {
                return Err(ReleaseError::Config("`crates` must not be empty".to_string()));
            }
            Some(names)
        }
    };

    Ok(ManifestOverrides {
        crates,
        docs_crate: string_key("docs-crate")?,
        branch: string_key("branch")?,
        remote: string_key("remote")?,
        readme: string_key("readme")?.map(PathBuf::from),
    })
}
