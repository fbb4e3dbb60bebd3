//! Shared support code for the function tester: environment configuration,
//! the grading config document, and logging initialisation.

pub mod config;
pub mod grading_config;
pub mod logging;
pub mod test_helpers;
