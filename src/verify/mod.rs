//! Validation performed before any file is touched.

pub mod preflight;
pub mod rules;

pub use preflight::{check_version_order, read_manifest};
pub use rules::validate_target_version;
