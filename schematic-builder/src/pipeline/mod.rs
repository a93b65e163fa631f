//! Build orchestration.
//!
//! This module provides:
//! - The staged schematic builder
//! - Per-stage build reports

mod builder;
mod report;


pub use builder::{build_schematic, SchematicBuilder};
pub use report::{BuildReport, StageRecord};
