//! File system operations with transaction support.
//!
//! Provides staged file updates that are written atomically and can be
//! restored as a unit.

pub mod transaction;

pub use transaction::{FileUpdate, Transaction, write_atomic};
