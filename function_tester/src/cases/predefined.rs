use super::check_points;
use crate::error::{PredicateError, TesterError};
use crate::traits::gradable::Gradable;
use crate::traits::outcome::IntoOutcome;
use std::fmt;
use std::sync::Arc;

/// A shareable test predicate over a function under test of type `F`.
pub type TestFn<F> = Arc<dyn Fn(&F) -> Result<bool, PredicateError> + Send + Sync>;

/// Wrap a closure into a [`TestFn`], applying the [`IntoOutcome`] coercion.
pub fn predicate<F, O, P>(p: P) -> TestFn<F>
where
    F: 'static,
    O: IntoOutcome,
    P: Fn(&F) -> O + Send + Sync + 'static,
{
    Arc::new(move |subject: &F| p(subject).into_outcome())
}

/// The predicate every new manual test starts with.
pub fn always_false<F: 'static>() -> TestFn<F> {
    Arc::new(|_: &F| Ok(false))
}

/// An immutable, caller-supplied test.
pub struct TestCase<F> {
    name: String,
    points: f64,
    test_fn: TestFn<F>,
}

impl<F: 'static> TestCase<F> {
    /// # Errors
    /// Returns [`TesterError::InvalidPoints`] for negative or non-finite points.
    pub fn new<O, P>(name: impl Into<String>, points: f64, p: P) -> Result<Self, TesterError>
    where
        O: IntoOutcome,
        P: Fn(&F) -> O + Send + Sync + 'static,
    {
        Self::from_fn(name, points, predicate(p))
    }

    pub fn from_fn(
        name: impl Into<String>,
        points: f64,
        test_fn: TestFn<F>,
    ) -> Result<Self, TesterError> {
        Ok(Self {
            name: name.into(),
            points: check_points(points)?,
            test_fn,
        })
    }
}

impl<F> TestCase<F> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> f64 {
        self.points
    }
}

impl<F> Gradable<F> for TestCase<F> {
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

impl<F> Clone for TestCase<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            points: self.points,
            test_fn: Arc::clone(&self.test_fn),
        }
    }
}

impl<F> fmt::Debug for TestCase<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}
