//! # Function Tester
//!
//! A schema-driven value engine plus a scoring harness for a single function under test.
//!
//! A session is seeded with the function, a descriptor for its input, a descriptor for its output
//! and a list of predefined tests. Users then author manual tests against the input descriptor,
//! run tests one at a time or all at once, and finish with a [`FinishSummary`] that records every
//! test, its result and the points earned.
//!
//! ```rust
//! use function_tester::{TestCase, TestSession, TypeDescriptor};
//!
//! type Adder = fn(i64, i64) -> i64;
//! fn add(a: i64, b: i64) -> i64 { a + b }
//!
//! let tests = vec![TestCase::new("adds", 2.0, |f: &Adder| f(2, 3) == 5).unwrap()];
//! let mut session = TestSession::new(
//!     add as Adder,
//!     TypeDescriptor::record([("a", TypeDescriptor::number()), ("b", TypeDescriptor::number())]),
//!     TypeDescriptor::number(),
//!     tests,
//! );
//!
//! session.run_all().unwrap();
//! let summary = session.finish();
//! assert_eq!(summary.total_points, 2.0);
//! assert!(summary.passed);
//! ```

pub mod cases;
pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod feedback;
pub mod report;
pub mod scorer;
pub mod session;
pub mod traits;
pub mod types;

pub use cases::{ManualTestCase, ManualTestPatch, TestCase, TestFn};
pub use descriptor::{PathSegment, TypeDescriptor};
pub use diagnostics::{Diagnostic, FieldTarget};
pub use error::TesterError;
pub use report::{FinishSummary, TestReportResponse, TestSnapshot};
pub use session::TestSession;
pub use types::{TestId, TestKind, TestOutcome};
