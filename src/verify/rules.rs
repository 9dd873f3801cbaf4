//! Validation rules for the requested version.
//!
//! Pure functions with no I/O or side effects.

use crate::error::Result;
use crate::version::Version;

/// Validates the target version string.
///
/// ## Rules
/// - Exactly three dot-separated groups of ASCII digits
/// - No leading `v`, no pre-release or build metadata
/// - Each group fits in a `u64`
///
/// # Errors
///
/// `InvalidVersion` naming the offending string.
pub fn validate_target_version(raw: &str) -> Result<Version> {
    raw.parse()
}
