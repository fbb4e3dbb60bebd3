//! # Finish Summary Module
//!
//! This module defines the data handed to the collaborator that consumes grading output once a
//! session finishes.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Testing complete.",
//!   "data": {
//!     "finished_at": "2025-01-01T00:00:00+00:00",
//!     "tests": [
//!       { "index": 0, "id": 0, "kind": "predefined", "name": "adds", "points": 2.0, "result": true }
//!     ],
//!     "test_results": { "0": true },
//!     "total_points": 2.0,
//!     "possible_points": 2.0,
//!     "percentage": 100.0,
//!     "passed": true,
//!     "feedback": [ { "test": "adds", "message": "Passed" } ]
//!   }
//! }
//! ```
//!
//! ## Design Notes
//!
//! - Every type here is an owned copy. Mutating the session after `finish()` never changes a
//!   summary already handed out.
//! - Predicates are capabilities, not data, so a [`TestSnapshot`] carries everything about a test
//!   except its predicate.

use crate::traits::feedback::FeedbackEntry;
use crate::types::{TestId, TestKind};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Data-only copy of one test in the combined list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSnapshot {
    /// Position in predefined ++ manual at the time of the snapshot.
    pub index: usize,
    pub id: TestId,
    pub kind: TestKind,
    pub name: String,
    pub points: f64,
    /// Manual tests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    /// Manual tests only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// `None` when the test was never run.
    pub result: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinishSummary {
    pub finished_at: String,
    pub tests: Vec<TestSnapshot>,
    /// Combined-list index to recorded outcome, for tests that were run.
    pub test_results: BTreeMap<usize, bool>,
    pub total_points: f64,
    pub possible_points: f64,
    pub percentage: f64,
    /// Whether `percentage` reached the configured pass mark.
    pub passed: bool,
    pub feedback: Vec<FeedbackEntry>,
}

/// Response envelope for a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct TestReportResponse {
    pub success: bool,
    pub message: String,
    pub data: FinishSummary,
}

impl From<FinishSummary> for TestReportResponse {
    fn from(summary: FinishSummary) -> Self {
        TestReportResponse {
            success: true,
            message: "Testing complete.".to_string(),
            data: summary,
        }
    }
}
