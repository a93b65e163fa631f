//! Stage trait and implementations.
//!
//! Stages are the units of work a build runs in sequence. Each one is
//! fallible and is run through [`try_catch_unwind`] by the pipeline.

mod clean;
mod compile;
mod copy;
mod manifest;
mod output_dir;
pub mod result;
mod verify;

pub use clean::{clean_output_dir, CleanStage};
pub use compile::{CompileStage, Compiler, TscCompiler};
pub use copy::{copy_project_files, CopyStage};
pub use manifest::{clean_package_json, render_manifest, strip_dev_fields, RewriteManifestStage, DEV_FIELDS};
pub use output_dir::{output_dir_from_config, resolve_output_dir};
pub use result::{try_catch, try_catch_unwind, StageResult};
pub use verify::{verify_schematics_entry, VerifyStage};

use crate::config::ValidatedOptions;
use crate::context::BuilderContext;
use crate::core::StageKind;
use crate::errors::BuilderResult;
use async_trait::async_trait;
use std::fmt::Debug;

/// What a stage can see while it runs.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    builder: &'a BuilderContext,
    options: &'a ValidatedOptions,
}

impl<'a> StageContext<'a> {
    /// Creates a new stage context.
    #[must_use]
    pub fn new(builder: &'a BuilderContext, options: &'a ValidatedOptions) -> Self {
        Self { builder, options }
    }

    /// The host context.
    #[must_use]
    pub fn builder(&self) -> &'a BuilderContext {
        self.builder
    }

    /// The validated build options.
    #[must_use]
    pub fn options(&self) -> &'a ValidatedOptions {
        self.options
    }
}

/// Trait for build stages.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Which stage this is; selects its log messages.
    fn kind(&self) -> StageKind;

    /// Executes the stage.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The stage execution context
    async fn execute(&self, ctx: &StageContext<'_>) -> BuilderResult<()>;
}
