//! Mock compilers for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{BuilderError, BuilderResult};
use crate::stages::Compiler;

/// One recorded compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCompile {
    /// The configuration path it was given.
    pub ts_config: String,
    /// The directory it ran in.
    pub cwd: PathBuf,
}

/// A compiler that records calls and succeeds without doing anything.
#[derive(Debug, Default)]
pub struct RecordingCompiler {
    calls: Mutex<Vec<RecordedCompile>>,
}

impl RecordingCompiler {
    /// Creates a new recording compiler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded invocations.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCompile> {
        self.calls.lock().clone()
    }

    /// Returns the number of invocations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Compiler for RecordingCompiler {
    async fn compile(&self, ts_config: &str, cwd: &Path) -> BuilderResult<()> {
        self.calls.lock().push(RecordedCompile {
            ts_config: ts_config.to_string(),
            cwd: cwd.to_path_buf(),
        });
        Ok(())
    }
}

/// A compiler that always exits with a non-zero code.
#[derive(Debug, Clone)]
pub struct FailingCompiler {
    code: i32,
}

impl FailingCompiler {
    /// Creates a compiler that exits with `code`.
    #[must_use]
    pub fn new(code: i32) -> Self {
        Self { code }
    }
}

impl Default for FailingCompiler {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
impl Compiler for FailingCompiler {
    async fn compile(&self, ts_config: &str, _cwd: &Path) -> BuilderResult<()> {
        Err(BuilderError::CompilerExit {
            command: format!("tsc -p {ts_config}"),
            code: self.code,
        })
    }
}

/// A compiler that writes fixed files into a directory, like `tsc` emitting
/// into `outDir`.
#[derive(Debug, Clone)]
pub struct EmittingCompiler {
    out_dir: PathBuf,
    files: Vec<(PathBuf, String)>,
    delay: Option<Duration>,
}

impl EmittingCompiler {
    /// Creates a compiler that emits into `out_dir`.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            files: Vec::new(),
            delay: None,
        }
    }

    /// Adds a file to emit, relative to the output directory.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Sleeps before emitting.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl Compiler for EmittingCompiler {
    async fn compile(&self, _ts_config: &str, _cwd: &Path) -> BuilderResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        for (relative, content) in &self.files {
            let path = self.out_dir.join(relative);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| BuilderError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
            tokio::fs::write(&path, content)
                .await
                .map_err(|source| BuilderError::Write { path, source })?;
        }
        Ok(())
    }
}

/// A compiler that panics when invoked.
#[derive(Debug, Clone, Default)]
pub struct PanickingCompiler;

#[async_trait]
impl Compiler for PanickingCompiler {
    async fn compile(&self, _ts_config: &str, _cwd: &Path) -> BuilderResult<()> {
        panic!("compiler crashed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_recording_compiler() {
        let compiler = RecordingCompiler::new();
        compiler.compile("tsconfig.json", Path::new("/ws")).await.unwrap();

        assert_eq!(
            compiler.calls(),
            vec![RecordedCompile {
                ts_config: "tsconfig.json".to_string(),
                cwd: PathBuf::from("/ws"),
            }]
        );
    }

    #[tokio::test]
    async fn test_failing_compiler_message() {
        let err = FailingCompiler::new(2)
            .compile("tsconfig.lib.json", Path::new("."))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Command failed with exit code 2: tsc -p tsconfig.lib.json"
        );
    }

    #[tokio::test]
    async fn test_emitting_compiler_writes_nested() {
        let dir = tempfile::tempdir().unwrap();
        EmittingCompiler::new(dir.path())
            .with_file("ng-add/index.js", "module.exports = {};")
            .compile("tsconfig.json", dir.path())
            .await
            .unwrap();

        assert!(dir.path().join("ng-add/index.js").is_file());
    }
}
