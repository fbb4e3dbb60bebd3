//! # AutoFeedback Strategy
//!
//! Template-based feedback derived from each test's recorded result.

use crate::report::TestSnapshot;
use crate::traits::feedback::{Feedback, FeedbackEntry};

#[derive(Debug, Default)]
pub struct AutoFeedback;

impl Feedback for AutoFeedback {
    fn assemble_feedback(&self, tests: &[TestSnapshot]) -> Vec<FeedbackEntry> {
        tests
            .iter()
            .map(|t| {
                let message = match (t.result, t.output.as_deref()) {
                    (Some(true), _) => "Passed".to_string(),
                    (Some(false), Some(expected)) if !expected.is_empty() => {
                        format!("Failed (expected: {expected})")
                    }
                    (Some(false), _) => "Failed".to_string(),
                    (None, _) => "Not run".to_string(),
                };
                FeedbackEntry {
                    test: t.name.clone(),
                    message,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TestId, TestKind};

    fn snapshot(name: &str, result: Option<bool>, output: Option<&str>) -> TestSnapshot {
        TestSnapshot {
            index: 0,
            id: TestId(0),
            kind: if output.is_some() {
                TestKind::Manual
            } else {
                TestKind::Predefined
            },
            name: name.to_string(),
            points: 1.0,
            input: None,
            output: output.map(str::to_string),
            result,
        }
    }

    #[test]
    fn one_entry_per_test_in_order() {
        let feedback = AutoFeedback.assemble_feedback(&[
            snapshot("a", Some(true), None),
            snapshot("b", Some(false), None),
            snapshot("c", None, None),
            snapshot("d", Some(false), Some("42")),
            snapshot("e", Some(false), Some("")),
        ]);

        let messages: Vec<(&str, &str)> = feedback
            .iter()
            .map(|f| (f.test.as_str(), f.message.as_str()))
            .collect();
        assert_eq!(
            messages,
            vec![
                ("a", "Passed"),
                ("b", "Failed"),
                ("c", "Not run"),
                ("d", "Failed (expected: 42)"),
                ("e", "Failed"),
            ]
        );
    }
}
