use crate::error::PredicateError;

/// A test that can be graded against a function under test of type `F`.
///
/// Implemented by both predefined and manual tests so the scorer can treat the combined list
/// uniformly.
pub trait Gradable<F> {
    fn name(&self) -> &str;

    /// Points granted when the test passes.
    fn points(&self) -> f64;

    /// Run the predicate. Errors are the predicate's own and must be propagated as-is.
    fn evaluate(&self, subject: &F) -> Result<bool, PredicateError>;
}
