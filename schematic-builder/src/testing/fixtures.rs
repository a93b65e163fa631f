//! Workspace fixtures for build tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::BuilderOptions;
use crate::context::BuilderContext;
use crate::errors::{BuilderError, BuilderResult};
use crate::logging::CollectingLogger;

/// A workspace on disk for running builds against.
///
/// The caller owns the root directory; this only writes into it.
#[derive(Debug, Clone)]
pub struct TestWorkspace {
    root: PathBuf,
    logger: Arc<CollectingLogger>,
}

impl TestWorkspace {
    /// Creates a workspace rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            logger: Arc::new(CollectingLogger::new()),
        }
    }

    /// The workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The logger every context from this workspace writes to.
    #[must_use]
    pub fn logger(&self) -> &CollectingLogger {
        &self.logger
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> BuilderResult<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| BuilderError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, content).map_err(|source| BuilderError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Writes a `tsconfig.json` with the given `outDir`, or none.
    pub fn write_ts_config(&self, out_dir: Option<&str>) -> BuilderResult<PathBuf> {
        let config = match out_dir {
            Some(dir) => serde_json::json!({ "compilerOptions": { "outDir": dir } }),
            None => serde_json::json!({ "compilerOptions": {} }),
        };
        self.write("tsconfig.json", &config.to_string())
    }

    /// Writes a `package.json` declaring `schematics` with dev-only fields.
    pub fn write_manifest(&self, schematics: &str) -> BuilderResult<PathBuf> {
        let manifest = serde_json::json!({
            "name": "@acme/schematics",
            "version": "1.0.0",
            "scripts": { "build": "schematic-build" },
            "schematics": schematics,
            "devDependencies": { "typescript": "^5.4.0" },
        });
        self.write("package.json", &manifest.to_string())
    }

    /// Options pointing at `tsconfig.json` in this workspace.
    #[must_use]
    pub fn options(&self) -> BuilderOptions {
        BuilderOptions::new("tsconfig.json")
    }

    /// A context rooted at this workspace that logs to [`Self::logger`].
    #[must_use]
    pub fn context(&self) -> BuilderContext {
        BuilderContext::new(self.logger.clone(), &self.root, &self.root)
    }
}
