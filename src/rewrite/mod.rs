//! Text rewrites for the version bump.
//!
//! - **`manifest`**: the canonical `version = "X.Y.Z"` line
//! - **`docs`**: `X.Y` dependency snippets in the README
//!
//! Both are regex-based so that formatting and comments are preserved.

pub mod docs;
pub mod manifest;

pub use docs::update_docs;
pub use manifest::{current_version, update_manifest_version};
