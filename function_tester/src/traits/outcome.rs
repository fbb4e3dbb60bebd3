//! Predicate outcome coercion.
//!
//! Predicates may return any type implementing [`IntoOutcome`]. The rule is applied once, when a
//! predicate is wrapped into a [`TestFn`](crate::cases::TestFn):
//!
//! | returned         | outcome                     |
//! |------------------|-----------------------------|
//! | `bool`           | as is                       |
//! | `Option<bool>`   | `None` is a failure         |
//! | `Result<bool, E>`| `Err(e)` is a predicate error |

use crate::error::PredicateError;

pub trait IntoOutcome {
    fn into_outcome(self) -> Result<bool, PredicateError>;
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Result<bool, PredicateError> {
        Ok(self)
    }
}

impl IntoOutcome for Option<bool> {
    fn into_outcome(self) -> Result<bool, PredicateError> {
        Ok(self.unwrap_or(false))
    }
}

impl<E> IntoOutcome for Result<bool, E>
where
    E: Into<PredicateError>,
{
    fn into_outcome(self) -> Result<bool, PredicateError> {
        self.map_err(Into::into)
    }
}
