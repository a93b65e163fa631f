//! Packaging check for the declared schematics entry.

use super::manifest::read_manifest;
use super::{Stage, StageContext};
use crate::config::MANIFEST_FILE;
use crate::core::StageKind;
use crate::errors::{BuilderError, BuilderResult};
use crate::utils::{normalize, resolve};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Confirms the manifest's `schematics` entry exists in `output_dir`.
///
/// An entry that resolves outside `output_dir` counts as missing.
///
/// Returns the resolved entry path.
pub async fn verify_schematics_entry(output_dir: &Path) -> BuilderResult<PathBuf> {
    let manifest = read_manifest(&output_dir.join(MANIFEST_FILE)).await?;

    let entry = match manifest.get("schematics") {
        Some(Value::String(entry)) if !entry.trim().is_empty() => entry,
        _ => {
            return Err(BuilderError::MissingSchematicsField {
                output_dir: output_dir.to_path_buf(),
            })
        }
    };

    let path = resolve(output_dir, entry);
    if !path.starts_with(normalize(output_dir)) {
        return Err(BuilderError::MissingSchematicsEntry {
            path,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "entry is outside the output directory",
            ),
        });
    }
    tokio::fs::read(&path)
        .await
        .map_err(|source| BuilderError::MissingSchematicsEntry {
            path: path.clone(),
            source,
        })?;

    debug!(entry = %path.display(), "Schematics entry present");
    Ok(path)
}

/// Stage that checks the packaged schematics entry.
#[derive(Debug, Clone)]
pub struct VerifyStage {
    output_dir: PathBuf,
}

impl VerifyStage {
    /// Creates a verify stage for `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Stage for VerifyStage {
    fn kind(&self) -> StageKind {
        StageKind::Verify
    }

    async fn execute(&self, _ctx: &StageContext<'_>) -> BuilderResult<()> {
        verify_schematics_entry(&self.output_dir).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_manifest(out: &Path, manifest: &str) {
        std::fs::write(out.join("package.json"), manifest).unwrap();
    }

    #[tokio::test]
    async fn test_entry_present() {
        let out = tempfile::tempdir().unwrap();
        stage_manifest(out.path(), r#"{"schematics": "./collection.json"}"#);
        std::fs::write(out.path().join("collection.json"), "{}").unwrap();

        let entry = verify_schematics_entry(out.path()).await.unwrap();
        assert_eq!(entry, out.path().join("collection.json"));
    }

    #[tokio::test]
    async fn test_entry_missing() {
        let out = tempfile::tempdir().unwrap();
        stage_manifest(out.path(), r#"{"schematics": "index.js"}"#);

        let err = verify_schematics_entry(out.path()).await.unwrap_err();
        assert!(matches!(err, BuilderError::MissingSchematicsEntry { .. }));
        assert!(err.is_packaging_error());
    }

    #[tokio::test]
    async fn test_field_missing() {
        let out = tempfile::tempdir().unwrap();
        stage_manifest(out.path(), r#"{"name": "pkg"}"#);

        let err = verify_schematics_entry(out.path()).await.unwrap_err();
        assert!(matches!(err, BuilderError::MissingSchematicsField { .. }));
    }

    #[tokio::test]
    async fn test_field_not_a_string() {
        let out = tempfile::tempdir().unwrap();
        stage_manifest(out.path(), r#"{"schematics": ["index.js"]}"#);

        let err = verify_schematics_entry(out.path()).await.unwrap_err();
        assert!(matches!(err, BuilderError::MissingSchematicsField { .. }));
    }

    #[tokio::test]
    async fn test_entry_outside_output_dir() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("dist");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(root.path().join("index.js"), "").unwrap();

        stage_manifest(&out, r#"{"schematics": "../index.js"}"#);
        let err = verify_schematics_entry(&out).await.unwrap_err();
        assert!(matches!(err, BuilderError::MissingSchematicsEntry { .. }));

        let absolute = root.path().join("index.js");
        let manifest = serde_json::json!({ "schematics": absolute.to_string_lossy() });
        stage_manifest(&out, &manifest.to_string());
        let err = verify_schematics_entry(&out).await.unwrap_err();
        assert!(matches!(err, BuilderError::MissingSchematicsEntry { .. }));
    }
}
