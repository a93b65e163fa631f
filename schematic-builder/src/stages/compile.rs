//! TypeScript compilation through an external compiler.

use super::{Stage, StageContext};
use crate::core::StageKind;
use crate::errors::{BuilderError, BuilderResult};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::info;

/// An external compiler the build delegates to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Compiler: Send + Sync {
    /// Compiles the project described by `ts_config`, running in `cwd`.
    ///
    /// Fails when the compiler cannot be started or exits unsuccessfully.
    async fn compile(&self, ts_config: &str, cwd: &Path) -> BuilderResult<()>;
}

/// Runs `tsc -p <tsConfig>` with the host's standard streams.
#[derive(Debug, Clone)]
pub struct TscCompiler {
    program: String,
    args: Vec<String>,
}

impl Default for TscCompiler {
    fn default() -> Self {
        Self::new("tsc")
    }
}

impl TscCompiler {
    /// Creates a compiler invoking `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds an argument placed before `-p`, e.g. `tsc` when `program` is `npx`.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command_line(&self, ts_config: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 3);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.push("-p");
        parts.push(ts_config);
        parts.join(" ")
    }
}

#[async_trait]
impl Compiler for TscCompiler {
    async fn compile(&self, ts_config: &str, cwd: &Path) -> BuilderResult<()> {
        let command = self.command_line(ts_config);
        info!(command = %command, cwd = %cwd.display(), "Running compiler");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg("-p")
            .arg(ts_config)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| BuilderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        Err(match status.code() {
            Some(code) => BuilderError::CompilerExit { command, code },
            None => BuilderError::CompilerSignal { command },
        })
    }
}

/// Stage that compiles the project.
#[derive(Clone)]
pub struct CompileStage {
    compiler: Arc<dyn Compiler>,
}

impl CompileStage {
    /// Creates a compile stage using `compiler`.
    #[must_use]
    pub fn new(compiler: Arc<dyn Compiler>) -> Self {
        Self { compiler }
    }
}

impl fmt::Debug for CompileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileStage").finish_non_exhaustive()
    }
}

#[async_trait]
impl Stage for CompileStage {
    fn kind(&self) -> StageKind {
        StageKind::Compile
    }

    async fn execute(&self, ctx: &StageContext<'_>) -> BuilderResult<()> {
        self.compiler
            .compile(ctx.options().ts_config(), ctx.builder().current_directory())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderOptions;
    use crate::context::BuilderContext;
    use mockall::predicate::eq;

    #[test]
    fn test_command_line() {
        let compiler = TscCompiler::new("npx").with_arg("tsc");
        assert_eq!(compiler.command_line("tsconfig.json"), "npx tsc -p tsconfig.json");
        assert_eq!(TscCompiler::default().program(), "tsc");
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let compiler = TscCompiler::new("schematic-builder-no-such-compiler");
        let err = compiler
            .compile("tsconfig.json", &std::env::temp_dir())
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::Spawn { .. }));
        assert!(err.to_string().contains("schematic-builder-no-such-compiler"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit() {
        let compiler = TscCompiler::new("false");
        let err = compiler
            .compile("tsconfig.json", &std::env::temp_dir())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command failed with exit code 1: false -p tsconfig.json"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit() {
        let compiler = TscCompiler::new("true");
        compiler
            .compile("tsconfig.json", &std::env::temp_dir())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_stage_passes_ts_config_and_cwd() {
        let mut compiler = MockCompiler::new();
        compiler
            .expect_compile()
            .with(eq("tsconfig.lib.json"), eq(Path::new("/workspace/app")))
            .times(1)
            .returning(|_, _| Ok(()));

        let builder = BuilderContext::silent("/workspace/app");
        let options = BuilderOptions::new("tsconfig.lib.json").validate().unwrap();
        let ctx = StageContext::new(&builder, &options);

        let stage = CompileStage::new(Arc::new(compiler));
        assert_eq!(stage.kind(), StageKind::Compile);
        stage.execute(&ctx).await.unwrap();
    }
}
