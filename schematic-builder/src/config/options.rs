//! Builder options as the host supplies them.

use crate::errors::{BuilderError, BuilderResult};
use serde::{Deserialize, Serialize};

/// The package manifest, always staged into the output directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Options for a schematic build.
///
/// Deserialised from the camelCase shape hosts store in their workspace
/// configuration, e.g. `{"tsConfig": "tsconfig.json", "files": ["README.md"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderOptions {
    /// Compiler configuration path, relative to the workspace root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_config: Option<String>,

    /// Extra file patterns to stage, relative to the current directory.
    #[serde(default)]
    pub files: Vec<String>,
}

impl BuilderOptions {
    /// Creates options for the given compiler configuration.
    #[must_use]
    pub fn new(ts_config: impl Into<String>) -> Self {
        Self {
            ts_config: Some(ts_config.into()),
            files: Vec::new(),
        }
    }

    /// Adds a file pattern.
    #[must_use]
    pub fn with_file(mut self, pattern: impl Into<String>) -> Self {
        self.files.push(pattern.into());
        self
    }

    /// Adds several file patterns.
    #[must_use]
    pub fn with_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Parses options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks the options and computes the effective file list.
    ///
    /// Performs no I/O.
    pub fn validate(&self) -> BuilderResult<ValidatedOptions> {
        let ts_config = match self.ts_config.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => return Err(BuilderError::MissingTsConfig),
        };

        let mut files = Vec::with_capacity(self.files.len() + 1);
        files.push(MANIFEST_FILE.to_string());
        files.extend(
            self.files
                .iter()
                .filter(|pattern| !is_manifest(pattern))
                .cloned(),
        );

        Ok(ValidatedOptions { ts_config, files })
    }
}

fn is_manifest(pattern: &str) -> bool {
    pattern.trim_start_matches("./") == MANIFEST_FILE
}

/// Options that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    ts_config: String,
    files: Vec<String>,
}

impl ValidatedOptions {
    /// The compiler configuration path.
    #[must_use]
    pub fn ts_config(&self) -> &str {
        &self.ts_config
    }

    /// The manifest followed by the configured file patterns.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }
}
