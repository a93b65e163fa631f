//! The read-only context a host supplies to a build.

use crate::logging::{BuilderLogger, NoOpLogger};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Host-supplied logger and working directories.
///
/// The builder only reads from this context; it never mutates it.
#[derive(Clone)]
pub struct BuilderContext {
    /// Logging channel for stage messages.
    logger: Arc<dyn BuilderLogger>,
    /// Root against which the compiler configuration path is resolved.
    workspace_root: PathBuf,
    /// Directory external tools run in and file patterns resolve against.
    current_directory: PathBuf,
}

impl BuilderContext {
    /// Creates a new builder context.
    pub fn new(
        logger: Arc<dyn BuilderLogger>,
        workspace_root: impl Into<PathBuf>,
        current_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            logger,
            workspace_root: workspace_root.into(),
            current_directory: current_directory.into(),
        }
    }

    /// Creates a context where both directories are `root` and nothing is logged.
    pub fn silent(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::new(Arc::new(NoOpLogger), root.clone(), root)
    }

    /// Replaces the logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn BuilderLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Returns the logger.
    #[must_use]
    pub fn logger(&self) -> &dyn BuilderLogger {
        self.logger.as_ref()
    }

    /// Returns the workspace root.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns the current working directory for external tools.
    #[must_use]
    pub fn current_directory(&self) -> &Path {
        &self.current_directory
    }
}

impl fmt::Debug for BuilderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderContext")
            .field("workspace_root", &self.workspace_root)
            .field("current_directory", &self.current_directory)
            .finish_non_exhaustive()
    }
}
