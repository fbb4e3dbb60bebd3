//! # Scorer Module
//!
//! The [`Scoreboard`] records one [`TestOutcome`] per [`TestId`] and keeps a running point total.
//!
//! ## Rules
//!
//! - A test already recorded as passed is never re-run: its predicate is not invoked again and no
//!   points are granted twice.
//! - Any other test (never run, or failed) is run; the outcome replaces the previous one.
//! - Points are added only on a transition into `passed`, and are frozen at that moment.
//! - A predicate error leaves the scoreboard exactly as it was before the call.
//!
//! The stored total is recomputed from the outcomes, in id order, after every change, so it is
//! always bit-for-bit equal to [`Scoreboard::score`] whatever order tests ran or were removed in.

use crate::error::TesterError;
use crate::traits::gradable::Gradable;
use crate::types::{TestId, TestOutcome};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Round `x` to `places` decimals using the multiply / round / divide trick.
#[inline]
pub fn round_to(x: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (x * factor).round() / factor
}

/// Percentage of `earned` over `total`, `0.0` when nothing is possible.
pub fn percentage(earned: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        (earned * 100.0) / total
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    results: BTreeMap<TestId, TestOutcome>,
    total_points: f64,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `test` against `subject` unless it has already passed.
    ///
    /// Returns the recorded pass/fail state for `id` after the call.
    ///
    /// # Errors
    /// Returns [`TesterError::Predicate`] if the predicate fails; nothing is recorded.
    pub fn run<F, T>(&mut self, id: TestId, test: &T, subject: &F) -> Result<bool, TesterError>
    where
        T: Gradable<F> + ?Sized,
    {
        if self.is_passed(id) {
            debug!(test = %id, name = test.name(), "already passed; skipping");
            return Ok(true);
        }

        let passed = test.evaluate(subject).map_err(|source| {
            warn!(test = %id, name = test.name(), error = %source, "predicate failed");
            TesterError::Predicate {
                test: test.name().to_string(),
                source,
            }
        })?;

        let points_awarded = if passed { test.points() } else { 0.0 };
        self.results.insert(
            id,
            TestOutcome {
                passed,
                points_awarded,
            },
        );
        self.total_points = self.score();

        info!(
            test = %id,
            name = test.name(),
            passed,
            points = points_awarded,
            total = self.total_points,
            "test run"
        );
        Ok(passed)
    }

    pub fn outcome(&self, id: TestId) -> Option<&TestOutcome> {
        self.results.get(&id)
    }

    pub fn is_passed(&self, id: TestId) -> bool {
        self.results.get(&id).is_some_and(|o| o.passed)
    }

    /// Drop the outcome for a test that no longer exists, withdrawing any points it was granted.
    pub fn forget(&mut self, id: TestId) -> Option<TestOutcome> {
        let removed = self.results.remove(&id)?;
        self.total_points = self.score();
        if removed.passed {
            debug!(test = %id, points = removed.points_awarded, "withdrew points of removed test");
        }
        Some(removed)
    }

    /// The total as of the last recorded change.
    pub fn total_points(&self) -> f64 {
        self.total_points
    }

    /// Sum of awarded points over every passed outcome.
    pub fn score(&self) -> f64 {
        self.results
            .values()
            .filter(|o| o.passed)
            .map(|o| o.points_awarded)
            .sum()
    }

    pub fn results(&self) -> &BTreeMap<TestId, TestOutcome> {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
