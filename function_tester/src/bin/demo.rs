//! Runs a small grading session against `add` and prints the JSON report.
//!
//! Reads the same environment as every other binary (`LOG_LEVEL`, `LOG_DIR`, `LOG_FILE`,
//! `LOG_TO_STDOUT`, `GRADING_CONFIG_PATH`).

use function_tester::{ManualTestPatch, PathSegment, TestCase, TestReportResponse, TestSession};
use serde_json::json;
use std::error::Error;
use tracing::{info, warn};
use util::config;
use util::grading_config::GradingConfig;
use util::logging::init_logging;

type Adder = fn(f64, f64) -> f64;

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn main() -> Result<(), Box<dyn Error>> {
    let _log_guard = init_logging(
        &config::log_dir(),
        &config::log_file(),
        config::log_to_stdout(),
    );

    let grading = match config::grading_config_path() {
        Some(path) => GradingConfig::load(path)?,
        None => GradingConfig::default_config(),
    };
    info!(project = %config::project_name(), env = %config::env(), "starting demo session");

    let tests = vec![
        TestCase::new("adds positives", 2.0, |f: &Adder| f(2.0, 3.0) == 5.0)?,
        TestCase::new("adds negatives", 2.0, |f: &Adder| f(-2.0, -3.0) == -5.0)?,
        TestCase::new("zero is identity", 1.0, |f: &Adder| Some(f(7.0, 0.0) == 7.0))?,
    ];

    let mut session = TestSession::from_json_descriptors(
        add as Adder,
        &json!({ "a": "number", "b": "number" }),
        &json!("number"),
        tests,
        grading,
    )?;

    let manual = session.add_manual_test()?;
    session.edit_manual_input(manual, &[PathSegment::from("a")], json!(4))?;
    session.edit_manual_input(manual, &[PathSegment::from("b")], json!(5))?;

    // still unnamed, so this reports one diagnostic
    session.validate_manual_test(manual)?;
    for (i, message) in session.diagnostic_messages().iter().enumerate() {
        let target = session.focus_diagnostic(i)?;
        warn!(field = target.element_id(), "{message}");
    }

    session.update_manual_test(
        manual,
        ManualTestPatch::new()
            .name("adds user input")
            .points(3.0)
            .output("9")
            .test_fn(|f: &Adder| f(4.0, 5.0) == 9.0),
    )?;
    session.validate_manual_test(manual)?;

    session.run_all()?;

    let response = TestReportResponse::from(session.finish());
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
