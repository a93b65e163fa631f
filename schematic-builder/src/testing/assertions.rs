//! Test assertions for build outcomes.

use crate::core::BuilderOutput;
use crate::logging::CollectingLogger;

/// Asserts that the build succeeded.
pub fn assert_build_succeeded(output: &BuilderOutput) {
    assert!(
        output.is_success(),
        "Expected success, got error: {:?}",
        output.error()
    );
}

/// Asserts that the build failed with an error containing `needle`.
pub fn assert_build_failed_with(output: &BuilderOutput, needle: &str) {
    assert!(!output.is_success(), "Expected failure, got success");
    let error = output.error().unwrap_or_default();
    assert!(
        error.contains(needle),
        "Expected error to contain '{needle}', got: {error}"
    );
}

/// Asserts that some log line contains `needle`.
pub fn assert_logged(logger: &CollectingLogger, needle: &str) {
    assert!(
        logger.contains(needle),
        "Expected a log line containing '{}'. Lines: {:?}",
        needle,
        logger.entries()
    );
}

/// Asserts that no log line contains `needle`.
pub fn assert_not_logged(logger: &CollectingLogger, needle: &str) {
    assert!(
        !logger.contains(needle),
        "Expected no log line containing '{}'. Lines: {:?}",
        needle,
        logger.entries()
    );
}
