//! # Types Module
//!
//! Small value types shared by the test model, the scorer and the report.

use serde::Serialize;
use std::fmt;

/// Stable identity of a test within one session.
///
/// Predefined tests get `0..N` in list order when the session starts. Manual tests draw fresh ids
/// from a session counter and ids are never reused, so a result stays attached to its test when
/// earlier manual tests are deleted and the combined list renumbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TestId(pub u64);

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a test in the combined list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Predefined,
    Manual,
}

/// The recorded outcome of running one test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestOutcome {
    pub passed: bool,
    /// Points granted when the test passed; `0.0` for a failure.
    pub points_awarded: f64,
}
