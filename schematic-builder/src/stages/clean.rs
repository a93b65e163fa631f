//! Output directory cleaning.

use super::{Stage, StageContext};
use crate::core::StageKind;
use crate::errors::{BuilderError, BuilderResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Removes the output directory if present, then recreates it empty.
///
/// Running it twice leaves an empty directory both times.
pub async fn clean_output_dir(output_dir: &Path) -> BuilderResult<()> {
    let exists = tokio::fs::try_exists(output_dir)
        .await
        .map_err(|source| BuilderError::Read {
            path: output_dir.to_path_buf(),
            source,
        })?;
    if exists {
        debug!(output_dir = %output_dir.display(), "Removing existing output directory");
        tokio::fs::remove_dir_all(output_dir)
            .await
            .map_err(|source| BuilderError::RemoveDir {
                path: output_dir.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| BuilderError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })
}

/// Stage that empties the output directory.
#[derive(Debug, Clone)]
pub struct CleanStage {
    output_dir: PathBuf,
}

impl CleanStage {
    /// Creates a clean stage for `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Stage for CleanStage {
    fn kind(&self) -> StageKind {
        StageKind::Clean
    }

    async fn execute(&self, _ctx: &StageContext<'_>) -> BuilderResult<()> {
        clean_output_dir(&self.output_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_empty_dir(path: &Path) -> bool {
        path.is_dir() && std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_clean_existing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dist = root.path().join("dist");
        std::fs::create_dir_all(dist.join("nested")).unwrap();
        std::fs::write(dist.join("stale.js"), "old").unwrap();
        std::fs::write(dist.join("nested/stale.d.ts"), "old").unwrap();

        clean_output_dir(&dist).await.unwrap();

        assert!(is_empty_dir(&dist));
    }

    #[tokio::test]
    async fn test_clean_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dist = root.path().join("build/dist");

        clean_output_dir(&dist).await.unwrap();

        assert!(is_empty_dir(&dist));
    }

    #[tokio::test]
    async fn test_clean_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dist = root.path().join("dist");

        clean_output_dir(&dist).await.unwrap();
        std::fs::write(dist.join("file.js"), "x").unwrap();
        clean_output_dir(&dist).await.unwrap();

        assert!(is_empty_dir(&dist));
    }

    #[tokio::test]
    async fn test_clean_fails_when_existence_check_fails() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = clean_output_dir(&file.join("dist")).await.unwrap_err();

        assert!(matches!(err, BuilderError::Read { .. }));
    }
}
