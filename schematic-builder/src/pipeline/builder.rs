//! The staged schematic build.

use super::report::{BuildReport, ReportRecorder};
use crate::config::{BuilderOptions, MessageTable, MessageVars};
use crate::context::BuilderContext;
use crate::core::{BuilderOutput, StageKind, StageStatus};
use crate::errors::BuilderError;
use crate::stages::{
    resolve_output_dir, try_catch_unwind, CleanStage, CompileStage, Compiler, CopyStage,
    RewriteManifestStage, Stage, StageContext, TscCompiler, VerifyStage,
};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs the build stages in order, stopping at the first failure.
///
/// ```text
/// Validate -> ResolveOutputDir -> Compile                                   (no outDir)
///                              -> Clean -> Compile -> Copy -> Rewrite -> Verify
/// ```
///
/// Every stage is run through [`try_catch_unwind`], so neither an error nor
/// a panic escapes: the host always gets a [`BuilderOutput`].
#[derive(Clone)]
pub struct SchematicBuilder {
    compiler: Arc<dyn Compiler>,
    messages: MessageTable,
}

impl Default for SchematicBuilder {
    fn default() -> Self {
        Self {
            compiler: Arc::new(TscCompiler::default()),
            messages: MessageTable::default(),
        }
    }
}

impl fmt::Debug for SchematicBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchematicBuilder")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl SchematicBuilder {
    /// Creates a builder that runs `tsc` with the default messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the compiler.
    #[must_use]
    pub fn with_compiler(mut self, compiler: Arc<dyn Compiler>) -> Self {
        self.compiler = compiler;
        self
    }

    /// Replaces the message table.
    #[must_use]
    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    /// Returns the message table.
    #[must_use]
    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    /// Runs the build and returns its outcome.
    pub async fn run(&self, options: &BuilderOptions, context: &BuilderContext) -> BuilderOutput {
        self.run_with_report(options, context).await.output
    }

    /// Runs the build and returns its outcome with per-stage records.
    pub async fn run_with_report(
        &self,
        options: &BuilderOptions,
        context: &BuilderContext,
    ) -> BuildReport {
        let mut report = ReportRecorder::new();

        // Pure validation: nothing is logged to the host and nothing touches disk.
        let options = match options.validate() {
            Ok(options) => options,
            Err(err) => {
                warn!(run_id = %report.run_id(), error = %err, "Invalid builder options");
                return report.finish(BuilderOutput::failure(err.to_string()));
            }
        };

        let logger = context.logger();
        let vars = MessageVars::new(options.ts_config());
        info!(run_id = %report.run_id(), ts_config = %options.ts_config(), "Starting schematic build");
        logger.info(&self.messages.start(StageKind::Build, &vars));

        logger.info(&self.messages.start(StageKind::ResolveOutputDir, &vars));
        let started = Instant::now();
        let (output_dir, err) = try_catch_unwind(resolve_output_dir(
            options.ts_config(),
            context.workspace_root(),
        ))
        .await
        .into_parts();
        if let Some(err) = err {
            return self.fail(report, StageKind::ResolveOutputDir, &vars, started, &err, context);
        }
        report.record(StageKind::ResolveOutputDir, StageStatus::Ok, started);

        let output_dir = output_dir.flatten();
        report.set_output_dir(output_dir.clone());

        let (stages, vars) = match output_dir {
            Some(ref dir) => {
                let vars = vars.with_output_dir(dir);
                logger.info(&self.messages.success(StageKind::ResolveOutputDir, &vars));
                (self.staging_stages(dir), vars)
            }
            None => {
                logger.info(&self.messages.compile_only(&vars));
                (self.compile_only_stages(), vars)
            }
        };

        let stage_ctx = StageContext::new(context, &options);
        for stage in &stages {
            let kind = stage.kind();
            logger.info(&self.messages.start(kind, &vars));
            debug!(stage = %kind, "Running stage");

            let started = Instant::now();
            let (_, err) = try_catch_unwind(stage.execute(&stage_ctx)).await.into_parts();
            if let Some(err) = err {
                return self.fail(report, kind, &vars, started, &err, context);
            }

            report.record(kind, StageStatus::Ok, started);
            logger.info(&self.messages.success(kind, &vars));
        }

        info!(run_id = %report.run_id(), "Schematic build completed");
        logger.info(&self.messages.success(StageKind::Build, &vars));
        report.finish(BuilderOutput::success())
    }

    fn staging_stages(&self, output_dir: &Path) -> Vec<Box<dyn Stage>> {
        vec![
            Box::new(CleanStage::new(output_dir)),
            Box::new(CompileStage::new(self.compiler.clone())),
            Box::new(CopyStage::new(output_dir)),
            Box::new(RewriteManifestStage::new(output_dir)),
            Box::new(VerifyStage::new(output_dir)),
        ]
    }

    fn compile_only_stages(&self) -> Vec<Box<dyn Stage>> {
        vec![Box::new(CompileStage::new(self.compiler.clone()))]
    }

    fn fail(
        &self,
        mut report: ReportRecorder,
        stage: StageKind,
        vars: &MessageVars<'_>,
        started: Instant,
        err: &BuilderError,
        context: &BuilderContext,
    ) -> BuildReport {
        error!(run_id = %report.run_id(), stage = %stage, error = %err, "Stage failed");
        context.logger().error(&self.messages.failure(stage, vars));
        report.record(stage, StageStatus::Fail, started);
        report.finish(BuilderOutput::failure(err.to_string()))
    }
}

/// Runs a build with the default compiler and messages.
pub async fn build_schematic(options: &BuilderOptions, context: &BuilderContext) -> BuilderOutput {
    SchematicBuilder::default().run(options, context).await
}
