use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Bump the version of a set of lock-step packages, then tag, push and publish them.
#[derive(Parser, Debug, Clone)]
#[command(name = "release-bump", version, about)]
pub struct ReleaseArgs {
    /// New version, in the form X.Y.Z
    #[arg(value_name = "NEW_VERSION")]
    pub new_version: String,

    /// Path to the manifest holding the canonical version
    #[arg(long, value_name = "PATH", default_value = "Cargo.toml")]
    pub manifest_path: PathBuf,

    /// Documentation file whose dependency snippets mirror the version
    #[arg(long, value_name = "PATH")]
    pub readme: Option<PathBuf>,

    /// Package to tag and publish (repeatable, replaces the configured list)
    #[arg(long = "crate", value_name = "NAME")]
    pub crates: Vec<String>,

    /// Branch pushed together with the tags
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Remote receiving the push
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Compare versions as plain strings instead of numerically
    #[arg(long)]
    pub lexical_compare: bool,

    /// Show what would change without writing files or running commands
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Continue an interrupted release from its last completed step
    #[arg(long, conflicts_with = "dry_run")]
    pub resume: bool,

    /// Stop after pushing; do not publish to the registry
    #[arg(long)]
    pub no_publish: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl ReleaseArgs {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
