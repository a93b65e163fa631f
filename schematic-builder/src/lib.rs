//! # Schematic Builder
//!
//! Builds a schematics package: compiles its TypeScript and stages a
//! publishable copy into the compiler's output directory.
//!
//! A build runs its stages strictly in sequence and stops at the first
//! failure:
//!
//! - **Resolve**: read `compilerOptions.outDir` from the `tsconfig`
//! - **Clean**: empty the output directory
//! - **Compile**: run the TypeScript compiler
//! - **Copy**: stage `package.json` and the configured files
//! - **Rewrite**: drop `scripts` and `devDependencies` from the staged manifest
//! - **Verify**: check the manifest's `schematics` entry exists
//!
//! When the `tsconfig` declares no `outDir`, only the compiler runs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schematic_builder::prelude::*;
//! use std::sync::Arc;
//!
//! let options = BuilderOptions::new("tsconfig.json").with_file("README.md");
//! let context = BuilderContext::new(Arc::new(TracingLogger::new()), ".", ".");
//!
//! let output = SchematicBuilder::new().run(&options, &context).await;
//! std::process::exit(output.exit_code());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod stages;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BuilderOptions, MessageTable, StageMessages};
    pub use crate::context::BuilderContext;
    pub use crate::core::{BuilderOutput, StageKind, StageStatus};
    pub use crate::errors::{BuilderError, BuilderResult};
    pub use crate::logging::{BuilderLogger, CollectingLogger, NoOpLogger, TracingLogger};
    pub use crate::pipeline::{build_schematic, BuildReport, SchematicBuilder, StageRecord};
    pub use crate::stages::{Compiler, Stage, TscCompiler};
}
