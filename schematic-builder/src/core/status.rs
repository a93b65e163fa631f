//! Stage identity and status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The named stages of a schematic build.
///
/// `Build` is not a unit of work; it labels the start and completion lines
/// that frame the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Locate the output directory from the compiler configuration.
    ResolveOutputDir,
    /// Remove and recreate the output directory.
    Clean,
    /// Run the TypeScript compiler.
    Compile,
    /// Copy project files into the output directory.
    Copy,
    /// Strip developer-only fields from the staged manifest.
    Rewrite,
    /// Check that the declared schematics entry was emitted.
    Verify,
    /// Whole-run messages.
    Build,
}

impl StageKind {
    /// All stages in pipeline order.
    pub const ALL: [Self; 7] = [
        Self::ResolveOutputDir,
        Self::Clean,
        Self::Compile,
        Self::Copy,
        Self::Rewrite,
        Self::Verify,
        Self::Build,
    ];

    /// The bracketed tag that prefixes every log line of this stage.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ResolveOutputDir => "GENERAL",
            Self::Clean => "CLEANING",
            Self::Compile => "COMPILING",
            Self::Copy => "COPYING",
            Self::Rewrite => "UPDATING",
            Self::Verify => "VERIFYING",
            Self::Build => "BUILD",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolveOutputDir => write!(f, "resolve_output_dir"),
            Self::Clean => write!(f, "clean"),
            Self::Compile => write!(f, "compile"),
            Self::Copy => write!(f, "copy"),
            Self::Rewrite => write!(f, "rewrite"),
            Self::Verify => write!(f, "verify"),
            Self::Build => write!(f, "build"),
        }
    }
}

/// The settled status of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage completed successfully.
    Ok,
    /// Stage failed.
    Fail,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

impl StageStatus {
    /// Returns true if the status indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_kind_display() {
        assert_eq!(StageKind::ResolveOutputDir.to_string(), "resolve_output_dir");
        assert_eq!(StageKind::Clean.to_string(), "clean");
        assert_eq!(StageKind::Verify.to_string(), "verify");
    }

    #[test]
    fn test_stage_kind_tags() {
        assert_eq!(StageKind::ResolveOutputDir.tag(), "GENERAL");
        assert_eq!(StageKind::Rewrite.tag(), "UPDATING");
        assert_eq!(StageKind::Build.tag(), "BUILD");
    }

    #[test]
    fn test_stage_status_serialize() {
        let json = serde_json::to_string(&StageStatus::Fail).unwrap();
        assert_eq!(json, r#""fail""#);

        let deserialized: StageStatus = serde_json::from_str(r#""ok""#).unwrap();
        assert!(deserialized.is_success());
    }

    #[test]
    fn test_stage_kind_serialize() {
        let json = serde_json::to_string(&StageKind::ResolveOutputDir).unwrap();
        assert_eq!(json, r#""resolve_output_dir""#);
    }
}
