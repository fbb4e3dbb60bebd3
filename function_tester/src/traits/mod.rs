//!
//! Traits Module
//!
//! Core traits at the seams of the function tester.
//!
//! - [`gradable`]: a test that can be run against the function under test.
//! - [`outcome`]: the single coercion rule from predicate return values to pass/fail.
//! - [`feedback`]: pluggable per-test feedback for the finish summary.

pub mod feedback;
pub mod gradable;
pub mod outcome;
