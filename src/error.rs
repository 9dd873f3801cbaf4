//! Error types for release-bump.
//!
//! All operations return `Result<T>` which aliases `Result<T, ReleaseError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from release operations.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Wrong number of positional arguments.
    #[error("{0}")]
    Usage(String),

    /// Target version is not `X.Y.Z`.
    #[error("Target version '{0}' must be in the format X.Y.Z")]
    InvalidVersion(String),

    /// Manifest file is missing.
    #[error("{} not found.", .0.display())]
    ManifestNotFound(PathBuf),

    /// No `version = "X.Y.Z"` line in the manifest.
    #[error("Could not find version in {}", .0.display())]
    VersionNotFound(PathBuf),

    /// The version line carries trailing text and cannot be rewritten in place.
    #[error("Version line in {} must be exactly `version = \"X.Y.Z\"` to be updated", .0.display())]
    VersionLineNotRewritable(PathBuf),

    /// Manifest exists but could not be read.
    #[error("Error reading or parsing {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Target is not strictly greater than the current version.
    #[error("Target version {target} must be greater than the current version {current}")]
    NotNewer { current: String, target: String },

    /// An external command exited non-zero or could not be spawned.
    #[error("Error executing command: {command}")]
    CommandFailed { command: String, stderr: String },

    /// `--resume` was requested for a different version than the one recorded.
    #[error("Recorded release is for v{recorded}, not v{requested}")]
    StateMismatch { recorded: String, requested: String },

    /// A previous release was interrupted and has not been resumed.
    #[error("Release of v{0} was interrupted; rerun with --resume to continue it")]
    ReleaseInProgress(String),

    /// The recorded steps differ from the steps this run would execute.
    #[error("Release plan changed since the interrupted run (recorded: {recorded}; now: {current})")]
    PlanChanged { recorded: String, current: String },

    /// The manifest does not hold the version of the interrupted release.
    #[error(
        "Manifest holds v{found} but the interrupted release is for v{recorded}; remove {} to start over",
        .state_path.display()
    )]
    ResumeNotBumped {
        recorded: String,
        found: String,
        state_path: PathBuf,
    },

    /// `--resume` was requested but no release is in progress.
    #[error("No interrupted release found at {}", .0.display())]
    NothingToResume(PathBuf),

    /// Invalid `[*.metadata.release]` configuration.
    #[error("Invalid release configuration: {0}")]
    Config(String),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Release state file could not be (de)serialized.
    #[error("State file error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for release-bump operations.
pub type Result<T> = std::result::Result<T, ReleaseError>;
