//! Test verdict

/// Marker the test agent prints when a test fails.
pub const FAILURE_MARKER: &str = "FAILED";

/// Whether a test run passed: exactly the absence of `FAILED`.
pub fn tests_passed(output: &str) -> bool {
    !output.contains(FAILURE_MARKER)
}
