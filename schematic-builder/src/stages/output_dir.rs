//! Output directory resolution from the compiler configuration.

use crate::errors::{BuilderError, BuilderResult};
use crate::utils::{parent_dir, resolve};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the compiler configuration and returns its declared output directory.
///
/// `ts_config` is resolved against `workspace_root`. Returns `None` when the
/// configuration sets no `compilerOptions.outDir`; otherwise the directory
/// resolved against the configuration file's own directory.
pub async fn resolve_output_dir(
    ts_config: &str,
    workspace_root: &Path,
) -> BuilderResult<Option<PathBuf>> {
    let config_path = resolve(workspace_root, ts_config);
    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|source| BuilderError::Read {
            path: config_path.clone(),
            source,
        })?;

    let config: Value = serde_json::from_str(&content).map_err(|source| BuilderError::Parse {
        path: config_path.clone(),
        source,
    })?;

    let output_dir = output_dir_from_config(&config, &config_path)?;
    debug!(config = %config_path.display(), output_dir = ?output_dir, "Resolved output directory");
    Ok(output_dir)
}

/// Extracts `compilerOptions.outDir` from a parsed configuration at `config_path`.
pub fn output_dir_from_config(config: &Value, config_path: &Path) -> BuilderResult<Option<PathBuf>> {
    let out_dir = match config.get("compilerOptions").and_then(|o| o.get("outDir")) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(dir)) => dir,
        Some(_) => {
            return Err(BuilderError::InvalidField {
                path: config_path.to_path_buf(),
                field: "compilerOptions.outDir",
                expected: "a string",
            })
        }
    };

    Ok(Some(resolve(parent_dir(config_path), out_dir)))
}
