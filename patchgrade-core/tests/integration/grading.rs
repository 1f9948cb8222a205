// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use indoc::indoc;
use patchgrade_core::{
    gate,
    parsers::LogDialect,
    registry::DialectRegistry,
    report::{GradeOptions, Grader},
    resolution::ResolutionMode,
};
use patchgrade_metadata::{
    GoldPartitions, GoldSpec, LogMarker, Prediction, ReportMap, ResolvedStatus, TestStatus,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn detailed(mode: ResolutionMode) -> GradeOptions {
    GradeOptions::new(mode)
        .with_include_tests_status(true)
        .with_include_raw_log(true)
}

#[test]
fn django_resolved() {
    init_tracing();

    let gold = GoldSpec::attributes(
        DJANGO_ID,
        GoldPartitions::new(
            [
                "test_ascii_validator (auth_tests.test_validators.UsernameValidatorsTests)",
                "test_unicode_validator (auth_tests.test_validators.UsernameValidatorsTests)",
            ],
            ["test_help_text (auth_tests.test_validators.UserAttributeSimilarityValidatorTest)"],
        ),
    );
    let prediction = Prediction::new(DJANGO_ID, Some(PATCH.to_owned()));
    let options = detailed(ResolutionMode::for_gold_shape(gold.shape));

    let reports = Grader::default().grade(&prediction, &gold, DJANGO_LOG, &options);
    let report = reports.get(DJANGO_ID).expect("report for instance");

    assert!(report.patch_exists);
    assert!(report.patch_successfully_applied);
    assert!(report.resolved);

    let raw_log = report.raw_log_content.as_deref().expect("raw log attached");
    assert!(
        !raw_log.contains("... FAIL"),
        "baseline output is cut off: {raw_log}"
    );

    let tests_status = report.tests_status.as_ref().expect("tests status attached");
    assert_eq!(tests_status.resolution_status, ResolvedStatus::Full);
    assert_eq!(tests_status.buckets.fail_to_pass.success.len(), 2);
    assert_eq!(tests_status.buckets.pass_to_pass.success.len(), 1);
}

#[test]
fn sympy_partial() {
    init_tracing();

    let statuses = DialectRegistry::builtin().select(SYMPY_ID).parse(SYMPY_LOG);
    assert_eq!(statuses.get("test_structure"), Some(TestStatus::Passed));
    assert_eq!(statuses.get("test_immutable"), Some(TestStatus::Failed));
    assert_eq!(
        statuses.get("sympy/core/tests/test_basic.py:test_immutable"),
        Some(TestStatus::Failed)
    );

    let gold = GoldPartitions::new(
        ["test_immutable", "test_preorder_traversal"],
        ["test_structure"],
    );
    let report = Grader::default().evaluate(
        SYMPY_ID,
        Some(PATCH),
        SYMPY_LOG,
        &gold,
        &detailed(ResolutionMode::Standard),
    );

    assert!(report.patch_successfully_applied);
    assert!(!report.resolved);
    let tests_status = report.tests_status.expect("tests status attached");
    assert_eq!(tests_status.resolution_status, ResolvedStatus::Partial);
    assert_eq!(
        tests_status.buckets.fail_to_pass.failure,
        ["test_immutable"]
    );
}

#[test_case(LogMarker::ApplyPatchFail; "apply failed")]
#[test_case(LogMarker::ResetFailed; "reset failed")]
#[test_case(LogMarker::TestsError; "tests errored")]
#[test_case(LogMarker::TestsTimeout; "tests timed out")]
fn gating_marker_rejects(marker: LogMarker) {
    // Valid-looking output doesn't matter once a gating marker is present.
    let log = format!("{DJANGO_LOG}{marker}\n");
    let outcome = gate::check(&log, DJANGO_ID);
    assert!(!outcome.is_ok());

    let gold = GoldPartitions::new(
        ["test_ascii_validator (auth_tests.test_validators.UsernameValidatorsTests)"],
        [],
    );
    let report = Grader::default().evaluate(
        DJANGO_ID,
        Some(PATCH),
        &log,
        &gold,
        &detailed(ResolutionMode::Standard),
    );
    assert!(report.patch_exists);
    assert!(!report.patch_successfully_applied);
    assert!(!report.resolved);
    assert_eq!(report.raw_log_content, None);
    assert_eq!(report.tests_status, None);
}

#[test]
fn smith_instance_without_apply_marker() {
    let log = indoc! {"
        ============================= test session starts ==============================
        collected 2 items

        pandas/tests/frame/test_arithmetic.py ..                                 [100%]

        =========================== short test summary info ============================
        PASSED pandas/tests/frame/test_arithmetic.py::test_frame_add[int64]
        PASSED pandas/tests/frame/test_arithmetic.py::test_frame_add[float64]
        ============================== 2 passed in 0.52s ===============================
    "};

    // The dotted family has no apply marker, and an unregistered project falls back to pytest.
    assert_eq!(
        DialectRegistry::builtin().select("acme__widgets.1a2b3c4d.lm_rewrite"),
        LogDialect::Pytest
    );
    let gold = GoldSpec::from_json_row(
        &json!({
            "instance_id": SMITH_ID,
            "FAIL_TO_PASS": "[\"pandas/tests/frame/test_arithmetic.py::test_frame_add[int64]\"]",
            "PASS_TO_PASS": ["pandas/tests/frame/test_arithmetic.py::test_frame_add[float64]"],
            "repo": "pandas-dev/pandas",
        })
        .to_string(),
    )
    .expect("valid gold row");
    let prediction = Prediction::new(SMITH_ID, Some(PATCH.to_owned()));
    let options = GradeOptions::new(ResolutionMode::for_gold_shape(gold.shape));
    assert_eq!(options.mode, ResolutionMode::Reduced);

    let reports = Grader::default().grade(&prediction, &gold, log, &options);
    assert_eq!(reports.resolved_count(), 1);
}

#[test]
fn report_json_shape() {
    let gold = GoldPartitions::new(["test_a", "test_b"], ["test_c"]);
    let log = "PASSED test_a\nFAILED test_b\nPASSED test_c\n";
    let options = GradeOptions::new(ResolutionMode::Standard).with_include_tests_status(true);
    let report = Grader::default().evaluate(SMITH_ID, Some(PATCH), log, &gold, &options);
    let reports = ReportMap::single(SMITH_ID, report);

    assert_eq!(
        serde_json::to_value(&reports).expect("serializable"),
        json!({
            "pandas-dev__pandas.95b0fa2b.func_pm_op_swap": {
                "patch_is_None": false,
                "patch_exists": true,
                "patch_successfully_applied": true,
                "resolved": false,
                "tests_status": {
                    "FAIL_TO_PASS": { "success": ["test_a"], "failure": ["test_b"] },
                    "PASS_TO_PASS": { "success": ["test_c"], "failure": [] },
                    "FAIL_TO_FAIL": { "success": [], "failure": [] },
                    "PASS_TO_FAIL": { "success": [], "failure": [] },
                    "resolution_status": "RESOLVED_PARTIAL",
                },
            }
        })
    );

    let missing = Grader::default().evaluate(SMITH_ID, None, log, &gold, &options);
    assert_eq!(
        serde_json::to_value(&missing).expect("serializable"),
        json!({
            "patch_is_None": true,
            "patch_exists": false,
            "patch_successfully_applied": false,
            "resolved": false,
        })
    );
}
