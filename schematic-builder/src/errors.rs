//! Error types for the schematic builder.
//!
//! Every stage operation returns [`BuilderError`]. The pipeline never lets
//! one escape: it is captured, logged, and folded into a
//! [`BuilderOutput`](crate::core::BuilderOutput).

use std::path::PathBuf;
use thiserror::Error;

/// Message returned when the compiler configuration path is absent.
pub const MISSING_TS_CONFIG_MESSAGE: &str =
    "tsConfig is required \nProvide tsconfig path in options in angular.json file!";

/// The main error type for schematic builder operations.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// The `tsConfig` option is missing or empty.
    #[error("{}", MISSING_TS_CONFIG_MESSAGE)]
    MissingTsConfig,

    /// A file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        /// The directory being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be removed.
    #[error("Failed to remove directory {}: {source}", .path.display())]
    RemoveDir {
        /// The directory being removed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        /// The document being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A recognised field holds a value of the wrong type.
    #[error("Invalid `{field}` in {}: expected {expected}", .path.display())]
    InvalidField {
        /// The document containing the field.
        path: PathBuf,
        /// Dotted field path.
        field: &'static str,
        /// Human description of the expected type.
        expected: &'static str,
    },

    /// An external program could not be started.
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        /// The program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The compiler exited with a non-zero status.
    #[error("Command failed with exit code {code}: {command}")]
    CompilerExit {
        /// The full command line.
        command: String,
        /// The exit code.
        code: i32,
    },

    /// The compiler was killed before it could exit.
    #[error("Command was terminated by a signal: {command}")]
    CompilerSignal {
        /// The full command line.
        command: String,
    },

    /// A file pattern is malformed.
    #[error("Invalid file pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// A literal path listed for copying does not exist.
    #[error("Cannot copy `{}`: the file doesn't exist", .path.display())]
    MissingSource {
        /// The missing path.
        path: PathBuf,
    },

    /// A file could not be copied.
    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The staged manifest declares no schematics entry.
    #[error("package.json in {} does not declare a `schematics` entry", .output_dir.display())]
    MissingSchematicsField {
        /// The output directory holding the manifest.
        output_dir: PathBuf,
    },

    /// The declared schematics entry is not present in the output.
    #[error("Schematics entry {} was not found in the build output: {source}", .path.display())]
    MissingSchematicsEntry {
        /// The expected entry path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stage panicked while running.
    #[error("Stage panicked: {0}")]
    Panicked(String),
}

impl BuilderError {
    /// Returns true for failures of the packaging check.
    #[must_use]
    pub fn is_packaging_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSchematicsField { .. } | Self::MissingSchematicsEntry { .. }
        )
    }

    /// Returns true for failures reported by an external tool.
    #[must_use]
    pub fn is_external_tool_error(&self) -> bool {
        matches!(
            self,
            Self::Spawn { .. }
                | Self::CompilerExit { .. }
                | Self::CompilerSignal { .. }
                | Self::Pattern { .. }
                | Self::MissingSource { .. }
                | Self::Copy { .. }
        )
    }
}

/// Result alias used across the crate.
pub type BuilderResult<T> = Result<T, BuilderError>;
