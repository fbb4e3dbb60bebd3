//! # Validation / Diagnostics
//!
//! Checks a manual test before it is trusted as a test input and reports problems as an ordered
//! list of [`Diagnostic`]s. Each diagnostic maps to the form field the presentation layer should
//! focus. The message-to-field mapping is a fixed table; looking up an unknown message is a
//! programming error and fails with [`TesterError::UnrecognizedDiagnosticTarget`].

use crate::cases::ManualTestCase;
use crate::descriptor::{TypeDescriptor, validate};
use crate::error::TesterError;
use serde::{Serialize, Serializer};
use std::fmt;

pub const NAME_REQUIRED: &str = "Test name is required";
pub const INVALID_INPUT: &str = "Invalid input value";

/// The form field a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTarget {
    Name,
    Input,
}

impl FieldTarget {
    /// Element id used by the editing form.
    pub fn element_id(&self) -> &'static str {
        match self {
            FieldTarget::Name => "name",
            FieldTarget::Input => "input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    NameRequired,
    InvalidInput,
}

impl Diagnostic {
    pub fn message(&self) -> &'static str {
        match self {
            Diagnostic::NameRequired => NAME_REQUIRED,
            Diagnostic::InvalidInput => INVALID_INPUT,
        }
    }

    pub fn target(&self) -> FieldTarget {
        match self {
            Diagnostic::NameRequired => FieldTarget::Name,
            Diagnostic::InvalidInput => FieldTarget::Input,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Resolve the focus target for a diagnostic message.
pub fn focus_target(message: &str) -> Result<FieldTarget, TesterError> {
    match message {
        NAME_REQUIRED => Ok(FieldTarget::Name),
        INVALID_INPUT => Ok(FieldTarget::Input),
        other => Err(TesterError::UnrecognizedDiagnosticTarget(other.to_string())),
    }
}

/// Run the independent checks in order: name first, then input.
pub fn check_manual_test<F>(
    input_descriptor: &TypeDescriptor,
    test: &ManualTestCase<F>,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if test.name.is_empty() {
        diagnostics.push(Diagnostic::NameRequired);
    }
    if !validate(input_descriptor, &test.input) {
        diagnostics.push(Diagnostic::InvalidInput);
    }
    diagnostics
}
