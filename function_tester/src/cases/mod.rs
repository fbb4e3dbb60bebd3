//! # Test Model
//!
//! Predefined tests are supplied by the caller and never change. Manual tests are authored during
//! a session: created empty, then refined through [`ManualTestPatch`]es.

pub mod manual;
pub mod predefined;

pub use manual::{ManualTestCase, ManualTestPatch};
pub use predefined::{TestCase, TestFn, always_false, predicate};

use crate::error::TesterError;

/// Points must be finite and non-negative.
pub(crate) fn check_points(points: f64) -> Result<f64, TesterError> {
    if points.is_finite() && points >= 0.0 {
        Ok(points)
    } else {
        Err(TesterError::InvalidPoints(points))
    }
}
