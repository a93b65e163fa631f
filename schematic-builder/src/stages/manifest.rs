//! Trimming developer-only fields from the staged package manifest.

use super::{Stage, StageContext};
use crate::config::MANIFEST_FILE;
use crate::core::StageKind;
use crate::errors::{BuilderError, BuilderResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fields removed from the published manifest.
pub const DEV_FIELDS: [&str; 2] = ["scripts", "devDependencies"];

/// Removes [`DEV_FIELDS`] from `manifest`, returning the ones that were present.
pub fn strip_dev_fields(manifest: &mut Map<String, Value>) -> Vec<&'static str> {
    DEV_FIELDS
        .into_iter()
        .filter(|field| manifest.shift_remove(*field).is_some())
        .collect()
}

/// Renders a manifest with 2-space indentation and a trailing newline.
pub fn render_manifest(manifest: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest.serialize(&mut serializer)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Rewrites `<output_dir>/package.json` without developer-only fields.
///
/// Absent fields are skipped silently. Other fields keep their order.
pub async fn clean_package_json(output_dir: &Path) -> BuilderResult<()> {
    let path = output_dir.join(MANIFEST_FILE);
    let mut manifest = read_manifest(&path).await?;

    let removed = match manifest {
        Value::Object(ref mut fields) => strip_dev_fields(fields),
        _ => {
            return Err(BuilderError::InvalidField {
                path,
                field: "(root)",
                expected: "an object",
            })
        }
    };
    debug!(manifest = %path.display(), removed = ?removed, "Stripped manifest fields");

    let rendered = render_manifest(&manifest).map_err(|source| BuilderError::Parse {
        path: path.clone(),
        source,
    })?;
    tokio::fs::write(&path, rendered)
        .await
        .map_err(|source| BuilderError::Write { path, source })
}

/// Reads and parses a JSON manifest.
pub(crate) async fn read_manifest(path: &Path) -> BuilderResult<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BuilderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| BuilderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Stage that rewrites the staged manifest.
#[derive(Debug, Clone)]
pub struct RewriteManifestStage {
    output_dir: PathBuf,
}

impl RewriteManifestStage {
    /// Creates a rewrite stage for the manifest in `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Stage for RewriteManifestStage {
    fn kind(&self) -> StageKind {
        StageKind::Rewrite
    }

    async fn execute(&self, _ctx: &StageContext<'_>) -> BuilderResult<()> {
        clean_package_json(&self.output_dir).await
    }
}
