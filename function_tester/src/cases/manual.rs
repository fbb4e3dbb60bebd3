//! Manual (user-authored) tests.
//!
//! A manual test starts in a deterministic empty state: no name, zero points, an always-false
//! predicate and the input descriptor's default value. Edits never mutate a test in place;
//! [`ManualTestCase::apply`] returns the merged replacement.

use super::check_points;
use super::predefined::{TestFn, always_false, predicate};
use crate::descriptor::{TypeDescriptor, synthesize_default};
use crate::error::{PredicateError, TesterError};
use crate::traits::gradable::Gradable;
use crate::traits::outcome::IntoOutcome;
use crate::types::TestId;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub struct ManualTestCase<F> {
    id: TestId,
    pub name: String,
    pub points: f64,
    /// Candidate input, expected to conform to the session's input descriptor.
    pub input: Value,
    /// Free-form expected-output note. Never checked mechanically.
    pub output: String,
    test_fn: TestFn<F>,
}

impl<F: 'static> ManualTestCase<F> {
    pub fn empty(id: TestId, input_descriptor: &TypeDescriptor) -> Self {
        Self {
            id,
            name: String::new(),
            points: 0.0,
            input: synthesize_default(input_descriptor),
            output: String::new(),
            test_fn: always_false(),
        }
    }
}

impl<F> ManualTestCase<F> {
    pub fn id(&self) -> TestId {
        self.id
    }

    /// Merge `patch` over this test. The id is always preserved.
    ///
    /// # Errors
    /// Returns [`TesterError::InvalidPoints`] when the patch carries negative or non-finite points.
    pub fn apply(&self, patch: ManualTestPatch<F>) -> Result<Self, TesterError> {
        let points = match patch.points {
            Some(p) => check_points(p)?,
            None => self.points,
        };
        Ok(Self {
            id: self.id,
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            points,
            input: patch.input.unwrap_or_else(|| self.input.clone()),
            output: patch.output.unwrap_or_else(|| self.output.clone()),
            test_fn: patch.test_fn.unwrap_or_else(|| Arc::clone(&self.test_fn)),
        })
    }
}

impl<F> Gradable<F> for ManualTestCase<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn points(&self) -> f64 {
        self.points
    }

    fn evaluate(&self, subject: &F) -> Result<bool, PredicateError> {
        (self.test_fn)(subject)
    }
}

impl<F> Clone for ManualTestCase<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            points: self.points,
            input: self.input.clone(),
            output: self.output.clone(),
            test_fn: Arc::clone(&self.test_fn),
        }
    }
}

impl<F> fmt::Debug for ManualTestCase<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTestCase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("points", &self.points)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// A partial update for a manual test. Unset fields keep their current value.
pub struct ManualTestPatch<F> {
    pub name: Option<String>,
    pub points: Option<f64>,
    pub input: Option<Value>,
    pub output: Option<String>,
    pub test_fn: Option<TestFn<F>>,
}

impl<F> Default for ManualTestPatch<F> {
    fn default() -> Self {
        Self {
            name: None,
            points: None,
            input: None,
            output: None,
            test_fn: None,
        }
    }
}

impl<F> ManualTestPatch<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn points(mut self, points: f64) -> Self {
        self.points = Some(points);
        self
    }

    pub fn input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

impl<F: 'static> ManualTestPatch<F> {
    pub fn test_fn<O, P>(mut self, p: P) -> Self
    where
        O: IntoOutcome,
        P: Fn(&F) -> O + Send + Sync + 'static,
    {
        self.test_fn = Some(predicate(p));
        self
    }
}
