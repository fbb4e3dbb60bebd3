//! # Test Session
//!
//! [`TestSession`] owns all state of one grading session: the function under test, the input and
//! output descriptors, the predefined tests, the manual tests being authored, the scoreboard, the
//! latest diagnostics and the "currently edited" pointer.
//!
//! The presentation layer addresses tests by their position in the combined list
//! (predefined ++ manual). Internally results are keyed by [`TestId`], so deleting a manual test
//! renumbers positions without moving results onto the wrong test.

use crate::cases::{ManualTestCase, ManualTestPatch, TestCase};
use crate::descriptor::{
    PathSegment, TypeDescriptor, append_at_path, display_path, remove_at_path, update_at_path,
};
use crate::diagnostics::{Diagnostic, FieldTarget, check_manual_test, focus_target};
use crate::error::TesterError;
use crate::feedback::auto_feedback::AutoFeedback;
use crate::report::{FinishSummary, TestSnapshot};
use crate::scorer::{Scoreboard, percentage, round_to};
use crate::traits::feedback::Feedback;
use crate::traits::gradable::Gradable;
use crate::types::{TestId, TestKind};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use util::grading_config::GradingConfig;

pub struct TestSession<F> {
    subject: F,
    input: TypeDescriptor,
    output: TypeDescriptor,
    predefined: Vec<TestCase<F>>,
    manual: Vec<ManualTestCase<F>>,
    scoreboard: Scoreboard,
    diagnostics: Vec<Diagnostic>,
    current: Option<usize>,
    next_id: u64,
    config: GradingConfig,
    feedback: Box<dyn Feedback + Send + Sync>,
}

impl<F: 'static> TestSession<F> {
    /// Start a session with the default grading config.
    ///
    /// # Arguments
    /// * `subject` - The function under test, handed to every predicate.
    /// * `input` - Shape of a manual test's input.
    /// * `output` - Shape of the function's output. Informational only.
    /// * `tests` - Predefined tests, in display order.
    pub fn new(
        subject: F,
        input: TypeDescriptor,
        output: TypeDescriptor,
        tests: Vec<TestCase<F>>,
    ) -> Self {
        let next_id = tests.len() as u64;
        Self {
            subject,
            input,
            output,
            predefined: tests,
            manual: Vec::new(),
            scoreboard: Scoreboard::new(),
            diagnostics: Vec::new(),
            current: None,
            next_id,
            config: GradingConfig::default_config(),
            feedback: Box::new(AutoFeedback),
        }
    }

    /// Start a session from JSON wire-shape descriptors, using `config` for parsing limits.
    ///
    /// # Errors
    /// Returns [`TesterError::MalformedDescriptor`] if either descriptor is malformed.
    pub fn from_json_descriptors(
        subject: F,
        input: &Value,
        output: &Value,
        tests: Vec<TestCase<F>>,
        config: GradingConfig,
    ) -> Result<Self, TesterError> {
        let depth = config.limits.max_descriptor_depth;
        let input = TypeDescriptor::from_json_with_depth(input, depth)?;
        let output = TypeDescriptor::from_json_with_depth(output, depth)?;
        Ok(Self::new(subject, input, output, tests).with_config(config))
    }

    pub fn with_config(mut self, config: GradingConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a custom feedback strategy for the finish summary.
    pub fn with_feedback<S: Feedback + Send + Sync + 'static>(mut self, feedback: S) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    // --- Manual test lifecycle ---

    /// Append a fresh manual test and make it the one being edited.
    ///
    /// Returns its position in the manual list.
    pub fn add_manual_test(&mut self) -> Result<usize, TesterError> {
        let limit = self.config.limits.max_manual_tests;
        if self.manual.len() >= limit {
            return Err(TesterError::ManualTestLimit(limit));
        }

        let id = TestId(self.next_id);
        self.next_id += 1;
        self.manual.push(ManualTestCase::empty(id, &self.input));

        let index = self.manual.len() - 1;
        self.current = Some(index);
        info!(test = %id, index, "added manual test");
        Ok(index)
    }
}

impl<F> TestSession<F> {
    // --- Accessors ---

    pub fn subject(&self) -> &F {
        &self.subject
    }

    pub fn input_descriptor(&self) -> &TypeDescriptor {
        &self.input
    }

    pub fn output_descriptor(&self) -> &TypeDescriptor {
        &self.output
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    pub fn predefined_tests(&self) -> &[TestCase<F>] {
        &self.predefined
    }

    pub fn manual_tests(&self) -> &[ManualTestCase<F>] {
        &self.manual
    }

    pub fn manual_test(&self, index: usize) -> Option<&ManualTestCase<F>> {
        self.manual.get(index)
    }

    /// Length of the combined list.
    pub fn len(&self) -> usize {
        self.predefined.len() + self.manual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combined-list position of manual test `index`.
    pub fn combined_index(&self, manual_index: usize) -> usize {
        self.predefined.len() + manual_index
    }

    /// Stable id of the test currently at combined position `index`.
    pub fn test_id(&self, index: usize) -> Option<TestId> {
        let n = self.predefined.len();
        if index < n {
            Some(TestId(index as u64))
        } else {
            self.manual.get(index - n).map(ManualTestCase::id)
        }
    }

    // --- Scoring ---

    /// Run the test at combined position `index`, unless it has already passed.
    ///
    /// # Errors
    /// * [`TesterError::TestIndexOutOfRange`] for a position past the combined list.
    /// * [`TesterError::Predicate`] when the predicate fails; the scoreboard is unchanged.
    pub fn run_test(&mut self, index: usize) -> Result<bool, TesterError> {
        let n = self.predefined.len();
        let (id, test): (TestId, &dyn Gradable<F>) = if index < n {
            (TestId(index as u64), &self.predefined[index])
        } else if let Some(manual) = self.manual.get(index - n) {
            (manual.id(), manual)
        } else {
            return Err(TesterError::TestIndexOutOfRange {
                index,
                len: self.len(),
            });
        };
        self.scoreboard.run(id, test, &self.subject)
    }

    /// Run every test in combined-list order. Stops at the first predicate failure.
    pub fn run_all(&mut self) -> Result<(), TesterError> {
        debug!(tests = self.len(), "running all tests");
        for index in 0..self.len() {
            self.run_test(index)?;
        }
        Ok(())
    }

    /// Recorded outcome of the test at combined position `index`.
    pub fn result(&self, index: usize) -> Option<bool> {
        self.test_id(index)
            .and_then(|id| self.scoreboard.outcome(id))
            .map(|o| o.passed)
    }

    /// Outcomes keyed by current combined position.
    pub fn test_results(&self) -> BTreeMap<usize, bool> {
        (0..self.len())
            .filter_map(|index| self.result(index).map(|passed| (index, passed)))
            .collect()
    }

    /// Sum of points over passed tests, derived from the recorded outcomes.
    pub fn score(&self) -> f64 {
        self.scoreboard.score()
    }

    /// The scoreboard's stored total, recomputed after every change so it equals [`score`](Self::score).
    pub fn total_points(&self) -> f64 {
        self.scoreboard.total_points()
    }

    /// Sum of points over the whole combined list.
    pub fn possible_points(&self) -> f64 {
        self.predefined.iter().map(TestCase::points).sum::<f64>()
            + self.manual.iter().map(|m| m.points).sum::<f64>()
    }

    // --- Manual test editing ---

    fn check_manual_index(&self, index: usize) -> Result<(), TesterError> {
        if index < self.manual.len() {
            Ok(())
        } else {
            Err(TesterError::ManualTestIndexOutOfRange {
                index,
                len: self.manual.len(),
            })
        }
    }

    /// Replace manual test `index` with `patch` merged over it. The edited pointer is unchanged.
    pub fn update_manual_test(
        &mut self,
        index: usize,
        patch: ManualTestPatch<F>,
    ) -> Result<(), TesterError> {
        self.check_manual_index(index)?;
        let updated = self.manual[index].apply(patch)?;
        debug!(test = %updated.id(), index, "updated manual test");
        self.manual[index] = updated;
        Ok(())
    }

    /// Remove manual test `index`, shifting later manual tests down, and clear the edited pointer.
    ///
    /// The removed test's outcome is discarded along with any points it was granted.
    pub fn delete_manual_test(&mut self, index: usize) -> Result<ManualTestCase<F>, TesterError> {
        self.check_manual_index(index)?;
        let removed = self.manual.remove(index);
        self.scoreboard.forget(removed.id());
        self.current = None;
        info!(test = %removed.id(), index, "deleted manual test");
        Ok(removed)
    }

    /// Make manual test `index` the one being edited.
    pub fn select_manual_test(&mut self, index: usize) -> Result<(), TesterError> {
        self.check_manual_index(index)?;
        self.current = Some(index);
        Ok(())
    }

    /// Position of the manual test being edited, if any.
    pub fn current_manual_test(&self) -> Option<usize> {
        self.current
    }

    fn replace_input(&mut self, index: usize, input: Value) -> Result<(), TesterError> {
        self.update_manual_test(index, ManualTestPatch::new().input(input))
    }

    /// Set the input node at `path` of manual test `index`.
    pub fn edit_manual_input(
        &mut self,
        index: usize,
        path: &[PathSegment],
        leaf: Value,
    ) -> Result<(), TesterError> {
        self.check_manual_index(index)?;
        let input = update_at_path(&self.input, &self.manual[index].input, path, leaf)
            .inspect_err(|e| rejected(index, path, e))?;
        self.replace_input(index, input)
    }

    /// Append an element to the list at `list_path` of manual test `index`'s input.
    pub fn append_manual_input_item(
        &mut self,
        index: usize,
        list_path: &[PathSegment],
        seed: Option<Value>,
    ) -> Result<(), TesterError> {
        self.check_manual_index(index)?;
        let input = append_at_path(&self.input, &self.manual[index].input, list_path, seed)
            .inspect_err(|e| rejected(index, list_path, e))?;
        self.replace_input(index, input)
    }

    /// Remove element `item` from the list at `list_path` of manual test `index`'s input.
    pub fn remove_manual_input_item(
        &mut self,
        index: usize,
        list_path: &[PathSegment],
        item: usize,
    ) -> Result<(), TesterError> {
        self.check_manual_index(index)?;
        let input = remove_at_path(&self.input, &self.manual[index].input, list_path, item)
            .inspect_err(|e| rejected(index, list_path, e))?;
        self.replace_input(index, input)
    }

    // --- Diagnostics ---

    /// Validate manual test `index`, replacing the current diagnostics list.
    pub fn validate_manual_test(&mut self, index: usize) -> Result<&[Diagnostic], TesterError> {
        self.check_manual_index(index)?;
        self.diagnostics = check_manual_test(&self.input, &self.manual[index]);
        debug!(index, errors = self.diagnostics.len(), "validated manual test");
        Ok(&self.diagnostics)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn diagnostic_messages(&self) -> Vec<&'static str> {
        self.diagnostics.iter().map(Diagnostic::message).collect()
    }

    /// Field to focus for the diagnostic at `error_index` of the current list.
    pub fn focus_diagnostic(&self, error_index: usize) -> Result<FieldTarget, TesterError> {
        let diagnostic = self.diagnostics.get(error_index).ok_or(
            TesterError::InvalidDiagnosticIndex {
                index: error_index,
                len: self.diagnostics.len(),
            },
        )?;
        focus_target(diagnostic.message())
    }

    // --- Summary ---

    /// Data-only copy of the combined list with each test's recorded result.
    pub fn snapshot(&self) -> Vec<TestSnapshot> {
        let predefined = self.predefined.iter().enumerate().map(|(index, t)| TestSnapshot {
            index,
            id: TestId(index as u64),
            kind: TestKind::Predefined,
            name: t.name().to_string(),
            points: t.points(),
            input: None,
            output: None,
            result: self.result(index),
        });

        let offset = self.predefined.len();
        let manual = self.manual.iter().enumerate().map(|(i, t)| TestSnapshot {
            index: offset + i,
            id: t.id(),
            kind: TestKind::Manual,
            name: t.name.clone(),
            points: t.points,
            input: Some(t.input.clone()),
            output: Some(t.output.clone()),
            result: self.result(offset + i),
        });

        predefined.chain(manual).collect()
    }

    /// Assemble the final report. The summary is an owned copy of the session state.
    pub fn finish(&self) -> FinishSummary {
        let places = self.config.scoring.round_to;
        let tests = self.snapshot();
        let feedback = self.feedback.assemble_feedback(&tests);

        let total_points = round_to(self.total_points(), places);
        let possible_points = round_to(self.possible_points(), places);
        let pct = round_to(percentage(total_points, possible_points), places);
        let passed = pct >= f64::from(self.config.scoring.pass_mark);

        info!(
            tests = tests.len(),
            total_points, possible_points, passed, "session finished"
        );

        FinishSummary {
            finished_at: Utc::now().to_rfc3339(),
            test_results: self.test_results(),
            tests,
            total_points,
            possible_points,
            percentage: pct,
            passed,
            feedback,
        }
    }
}

fn rejected(index: usize, path: &[PathSegment], error: &TesterError) {
    warn!(index, path = %display_path(path), %error, "rejected input edit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Adder = fn(i64, i64) -> i64;

    fn add(a: i64, b: i64) -> i64 {
        a + b
    }

    fn input_descriptor() -> TypeDescriptor {
        TypeDescriptor::from_json(&json!({ "age": "number", "tags": ["string"] })).unwrap()
    }

    fn session(tests: Vec<TestCase<Adder>>) -> TestSession<Adder> {
        TestSession::new(add as Adder, input_descriptor(), TypeDescriptor::number(), tests)
    }

    fn passing(name: &str, points: f64) -> TestCase<Adder> {
        TestCase::new(name, points, |f: &Adder| f(1, 2) == 3).unwrap()
    }

    fn failing(name: &str, points: f64) -> TestCase<Adder> {
        TestCase::new(name, points, |f: &Adder| f(1, 2) == 4).unwrap()
    }

    #[test]
    fn run_test_accumulates_and_is_idempotent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = TestCase::new("counted", 3.0, move |f: &Adder| {
            counter.fetch_add(1, Ordering::SeqCst);
            f(2, 2) == 4
        })
        .unwrap();

        let mut s = session(vec![counted, failing("wrong", 2.0)]);
        assert!(s.run_test(0).unwrap());
        assert!(s.run_test(0).unwrap());
        assert!(!s.run_test(1).unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(s.total_points(), 3.0);
        assert_eq!(s.score(), 3.0);
        assert_eq!(s.test_results(), BTreeMap::from([(0, true), (1, false)]));
    }

    #[test]
    fn run_test_out_of_range() {
        let mut s = session(vec![passing("a", 1.0)]);
        assert!(matches!(
            s.run_test(1),
            Err(TesterError::TestIndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn run_all_covers_predefined_then_manual() {
        let mut s = session(vec![passing("a", 1.0), passing("b", 2.0)]);
        let m = s.add_manual_test().unwrap();
        s.update_manual_test(
            m,
            ManualTestPatch::new()
                .name("mine")
                .points(4.0)
                .test_fn(|f: &Adder| f(0, 0) == 0),
        )
        .unwrap();
        let untouched = s.add_manual_test().unwrap();

        s.run_all().unwrap();
        assert_eq!(s.total_points(), 7.0);
        assert_eq!(s.result(s.combined_index(m)), Some(true));
        // a new manual test keeps the always-false predicate
        assert_eq!(s.result(s.combined_index(untouched)), Some(false));
    }

    #[test]
    fn run_all_stops_at_predicate_error() {
        let boom = TestCase::new("boom", 5.0, |_: &Adder| Err::<bool, String>("exploded".into()))
            .unwrap();
        let mut s = session(vec![passing("a", 1.0), boom, passing("c", 1.0)]);

        let err = s.run_all().unwrap_err();
        assert_eq!(err.to_string(), "Predicate for test 'boom' failed: exploded");
        assert_eq!(s.test_results(), BTreeMap::from([(0, true)]));
        assert_eq!(s.total_points(), 1.0);
    }

    #[test]
    fn add_selects_and_delete_clears_pointer() {
        let mut s = session(vec![]);
        assert_eq!(s.current_manual_test(), None);

        let first = s.add_manual_test().unwrap();
        assert_eq!(s.current_manual_test(), Some(first));
        let second = s.add_manual_test().unwrap();
        assert_eq!(s.current_manual_test(), Some(second));

        s.update_manual_test(first, ManualTestPatch::new().name("x")).unwrap();
        assert_eq!(s.current_manual_test(), Some(second));

        s.select_manual_test(first).unwrap();
        assert_eq!(s.current_manual_test(), Some(first));

        s.delete_manual_test(first).unwrap();
        assert_eq!(s.current_manual_test(), None);
        assert_eq!(s.manual_tests().len(), 1);
        assert!(s.select_manual_test(1).is_err());
    }

    #[test]
    fn new_manual_test_has_default_input() {
        let mut s = session(vec![]);
        let i = s.add_manual_test().unwrap();
        let t = s.manual_test(i).unwrap();
        assert_eq!(t.name, "");
        assert_eq!(t.points, 0.0);
        assert_eq!(t.input, json!({ "age": 0, "tags": [] }));
    }

    #[test]
    fn manual_test_limit_is_enforced() {
        let mut config = GradingConfig::default_config();
        config.limits.max_manual_tests = 1;
        let mut s = session(vec![]).with_config(config);

        s.add_manual_test().unwrap();
        assert!(matches!(
            s.add_manual_test(),
            Err(TesterError::ManualTestLimit(1))
        ));
    }

    #[test]
    fn deleting_a_passed_manual_test_withdraws_its_points() {
        let mut s = session(vec![passing("a", 1.0)]);
        let m = s.add_manual_test().unwrap();
        s.update_manual_test(
            m,
            ManualTestPatch::new().points(5.0).test_fn(|_: &Adder| true),
        )
        .unwrap();
        s.run_all().unwrap();
        assert_eq!(s.total_points(), 6.0);

        s.delete_manual_test(m).unwrap();
        assert_eq!(s.total_points(), 1.0);
        assert_eq!(s.score(), 1.0);
        assert_eq!(s.test_results(), BTreeMap::from([(0, true)]));
    }

    #[test]
    fn fractional_points_survive_reordered_runs_and_deletion() {
        let mut s = session(vec![passing("a", 0.1), passing("b", 0.2), passing("c", 0.3)]);
        s.run_test(2).unwrap();
        s.run_test(1).unwrap();
        s.run_test(0).unwrap();
        assert_eq!(s.total_points(), s.score());

        let m = s.add_manual_test().unwrap();
        s.update_manual_test(
            m,
            ManualTestPatch::new().points(0.2).test_fn(|_: &Adder| true),
        )
        .unwrap();
        s.run_all().unwrap();
        s.delete_manual_test(m).unwrap();
        assert_eq!(s.total_points(), s.score());
    }

    #[test]
    fn points_are_frozen_once_granted() {
        let mut s = session(vec![]);
        let m = s.add_manual_test().unwrap();
        s.update_manual_test(
            m,
            ManualTestPatch::new().points(2.0).test_fn(|_: &Adder| true),
        )
        .unwrap();
        s.run_test(0).unwrap();

        s.update_manual_test(m, ManualTestPatch::new().points(10.0)).unwrap();
        assert_eq!(s.total_points(), 2.0);
        assert_eq!(s.score(), 2.0);
        assert_eq!(s.possible_points(), 10.0);
    }

    #[test]
    fn input_edits_flow_through_structural_updates() {
        let mut s = session(vec![]);
        let m = s.add_manual_test().unwrap();

        s.edit_manual_input(m, &[PathSegment::from("age")], json!(41)).unwrap();
        s.append_manual_input_item(m, &[PathSegment::from("tags")], None).unwrap();
        s.append_manual_input_item(m, &[PathSegment::from("tags")], Some(json!("b")))
            .unwrap();
        s.edit_manual_input(
            m,
            &[PathSegment::from("tags"), PathSegment::from(0)],
            json!("a"),
        )
        .unwrap();
        assert_eq!(s.manual_test(m).unwrap().input, json!({ "age": 41, "tags": ["a", "b"] }));

        s.remove_manual_input_item(m, &[PathSegment::from("tags")], 0).unwrap();
        assert_eq!(s.manual_test(m).unwrap().input, json!({ "age": 41, "tags": ["b"] }));

        let err = s
            .edit_manual_input(m, &[PathSegment::from("height")], json!(1))
            .unwrap_err();
        assert!(matches!(err, TesterError::InvalidPath(_)));
        assert_eq!(s.manual_test(m).unwrap().input, json!({ "age": 41, "tags": ["b"] }));
    }

    #[test]
    fn validation_replaces_diagnostics_and_maps_focus() {
        let mut s = session(vec![]);
        let m = s.add_manual_test().unwrap();
        s.update_manual_test(
            m,
            ManualTestPatch::new().input(json!({ "age": "thirty", "tags": [] })),
        )
        .unwrap();

        let messages: Vec<&str> = s
            .validate_manual_test(m)
            .unwrap()
            .iter()
            .map(Diagnostic::message)
            .collect();
        assert_eq!(messages, vec!["Test name is required", "Invalid input value"]);
        assert_eq!(s.focus_diagnostic(0).unwrap(), FieldTarget::Name);
        assert_eq!(s.focus_diagnostic(1).unwrap(), FieldTarget::Input);
        assert!(matches!(
            s.focus_diagnostic(2),
            Err(TesterError::InvalidDiagnosticIndex { index: 2, len: 2 })
        ));

        s.update_manual_test(m, ManualTestPatch::new().name("ok")).unwrap();
        s.edit_manual_input(m, &[PathSegment::from("age")], json!(30)).unwrap();
        assert!(s.validate_manual_test(m).unwrap().is_empty());
        assert!(s.diagnostic_messages().is_empty());
    }

    #[test]
    fn finish_is_a_snapshot() {
        let mut s = session(vec![passing("a", 2.0), failing("b", 2.0)]);
        let m = s.add_manual_test().unwrap();
        s.update_manual_test(m, ManualTestPatch::new().name("mine").output("3"))
            .unwrap();
        s.run_all().unwrap();

        let summary = s.finish();
        assert_eq!(summary.tests.len(), 3);
        assert_eq!(summary.total_points, 2.0);
        assert_eq!(summary.possible_points, 4.0);
        assert_eq!(summary.percentage, 50.0);
        assert!(summary.passed);
        assert_eq!(
            summary.test_results,
            BTreeMap::from([(0, true), (1, false), (2, false)])
        );
        assert_eq!(summary.tests[2].kind, TestKind::Manual);
        assert_eq!(summary.feedback[2].message, "Failed (expected: 3)");

        s.update_manual_test(m, ManualTestPatch::new().name("renamed")).unwrap();
        s.delete_manual_test(m).unwrap();
        assert_eq!(summary.tests[2].name, "mine");
        assert_eq!(summary.tests.len(), 3);
    }

    #[test]
    fn from_json_descriptors_rejects_malformed() {
        let err = TestSession::<Adder>::from_json_descriptors(
            add as Adder,
            &json!({ "age": "integer" }),
            &json!("number"),
            vec![],
            GradingConfig::default_config(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, TesterError::MalformedDescriptor(_)));

        let mut config = GradingConfig::default_config();
        config.limits.max_descriptor_depth = 2;
        let too_deep = TestSession::<Adder>::from_json_descriptors(
            add as Adder,
            &json!({ "a": { "b": "number" } }),
            &json!("number"),
            vec![],
            config,
        );
        assert!(too_deep.is_err());
    }
}
