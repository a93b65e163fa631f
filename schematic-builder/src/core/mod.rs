//! Core domain model types for the schematic builder.
//!
//! This module contains:
//! - Stage identity and status enums
//! - The build outcome handed back to the host

mod output;
mod status;

pub use output::BuilderOutput;
pub use status::{StageKind, StageStatus};
