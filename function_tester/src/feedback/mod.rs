//! # Feedback Strategies Module
//!
//! Each strategy implements the [`Feedback`](crate::traits::feedback::Feedback) trait and produces
//! one [`FeedbackEntry`](crate::traits::feedback::FeedbackEntry) per test in the finish summary.
//!
//! - [`auto_feedback`]: pass/fail/not-run messages, with the expected-output note for manual
//!   tests that failed.

pub mod auto_feedback;
