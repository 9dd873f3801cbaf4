//! Bump, tag, push and publish a set of Cargo packages that share one version.
//!
//! ```text
//! release-bump 1.3.0
//! ```
//!
//! rewrites `version = "..."` in `Cargo.toml`, mirrors `1.3` into the README's
//! dependency snippets, then runs `git add`, `git commit`, `git tag` per crate,
//! `git push origin main --tags` and `cargo publish -p` per crate.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod fs;
pub mod rewrite;
pub mod steps;
pub mod verify;
pub mod version;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses the command line, sets up logging and runs the release.
///
/// `--help` and `--version` print and exit here. Any other argument error is
/// returned as [`ReleaseError::Usage`].
pub fn run() -> Result<()> {
    use clap::Parser;

    let args = match cli::ReleaseArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => return Err(ReleaseError::Usage(e.render().to_string())),
        Err(e) => e.exit(),
    };

    init_logging(args.log_level());
    steps::execute(args)
}

/// Installs the `env_logger` backend. `RUST_LOG` overrides `level`.
pub fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
