//!
//! # Feedback Trait
//!
//! This module defines the [`Feedback`] trait and the [`FeedbackEntry`] struct, which are used to
//! attach a human-readable message to every test in the finish summary.
//!

use crate::report::TestSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEntry {
    pub test: String,
    pub message: String,
}

/// A pluggable feedback strategy.
///
/// Receives the snapshots in combined-list order and returns one entry per snapshot, in the same
/// order.
pub trait Feedback {
    fn assemble_feedback(&self, tests: &[TestSnapshot]) -> Vec<FeedbackEntry>;
}
