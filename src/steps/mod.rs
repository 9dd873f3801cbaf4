//! The release sequence.
//!
//! - **`plan`**: the ordered steps and the command behind each
//! - **`state`**: the persisted resume cursor
//! - **`release`**: the driver tying validation, rewrites and the plan together

pub mod plan;
pub mod release;
pub mod state;

pub use plan::{ReleasePlan, Step};
pub use release::{execute, execute_with};
pub use state::ReleaseState;
