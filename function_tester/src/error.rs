//! Tester Error Types
//!
//! This module defines the [`TesterError`] enum, which covers every failure that can escape the
//! function tester: malformed type descriptors, structural edits that do not fit a descriptor,
//! predicate failures raised while running a test, and misuse of the session API.
//!
//! Validation failures are *not* errors. `validate` returns `false` and diagnostics turn that into
//! user-facing messages.
//!
//! # Example
//!
//! ```rust
//! use function_tester::descriptor::TypeDescriptor;
//! use function_tester::error::TesterError;
//! use serde_json::json;
//!
//! let err = TypeDescriptor::from_json(&json!("date")).unwrap_err();
//! assert!(matches!(err, TesterError::MalformedDescriptor(_)));
//! ```

/// Boxed error returned by a test predicate or by the function under test.
pub type PredicateError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents all error types that can occur in the function tester.
#[derive(Debug, thiserror::Error)]
pub enum TesterError {
    /// A type descriptor is not one of the recognised shapes.
    #[error("Malformed type descriptor: {0}")]
    MalformedDescriptor(String),

    /// A path does not address an element or field of the value under edit.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A test predicate (or the function under test) failed.
    #[error("Predicate for test '{test}' failed: {source}")]
    Predicate {
        test: String,
        #[source]
        source: PredicateError,
    },

    /// A focus target was requested for a message outside the fixed diagnostics table.
    #[error("No focus target registered for diagnostic '{0}'")]
    UnrecognizedDiagnosticTarget(String),

    /// A diagnostic was addressed by a position past the end of the current list.
    #[error("Diagnostic index {index} out of range (have {len})")]
    InvalidDiagnosticIndex { index: usize, len: usize },

    /// A combined-list index past the end of predefined ++ manual tests.
    #[error("Test index {index} out of range (have {len} tests)")]
    TestIndexOutOfRange { index: usize, len: usize },

    /// A manual-list index past the end of the manual tests.
    #[error("Manual test index {index} out of range (have {len} manual tests)")]
    ManualTestIndexOutOfRange { index: usize, len: usize },

    /// Points must be finite and non-negative.
    #[error("Invalid points value {0}: points must be finite and non-negative")]
    InvalidPoints(f64),

    /// The session already holds the configured maximum number of manual tests.
    #[error("Manual test limit of {0} reached")]
    ManualTestLimit(usize),
}
