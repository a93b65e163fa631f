//! The outcome a build hands back to its host.

use serde::{Deserialize, Serialize};

/// The final result of a schematic build.
///
/// Constructed once, either at the first failing stage or after the last
/// stage succeeds, and never mutated afterwards. Serialises to
/// `{"success":true}` or `{"success":false,"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderOutput {
    /// Whether every stage succeeded.
    pub success: bool,

    /// Failure message (for failed builds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BuilderOutput {
    /// Creates a successful outcome.
    #[must_use]
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Creates a failed outcome with an error message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// Returns true if the build succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Process exit code a host can use for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.success)
    }
}
