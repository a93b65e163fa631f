//! Context management for builds.
//!
//! This module provides the host context a build reads its logger and
//! working directories from.

mod host;

pub use host::BuilderContext;
