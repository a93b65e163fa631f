//! Testing utilities for schematic builds.
//!
//! This module provides:
//! - Mock compilers
//! - Workspace fixtures
//! - Assertions on build outcomes and logs

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_build_failed_with, assert_build_succeeded, assert_logged, assert_not_logged,
};
pub use fixtures::TestWorkspace;
pub use mocks::{
    EmittingCompiler, FailingCompiler, PanickingCompiler, RecordedCompile, RecordingCompiler,
};
