//! Utility functions for paths, identifiers and timestamps.

pub mod paths;
pub mod timestamps;

pub use paths::{normalize, parent_dir, resolve};
pub use timestamps::{elapsed_ms, Timestamp};

use uuid::Uuid;

/// Generates a random run identifier.
#[must_use]
pub fn generate_run_id() -> Uuid {
    Uuid::new_v4()
}
