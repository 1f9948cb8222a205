// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use camino_tempfile::Utf8TempDir;
use indoc::indoc;
use maplit::btreemap;
use patchgrade_core::{
    config::GradingConfig, parsers::LogDialect, report::Grader, resolution::ResolutionMode,
};
use patchgrade_metadata::{GoldPartitions, ResolvedStatus};
use pretty_assertions::assert_eq;

#[test]
fn config_drives_grading() {
    init_tracing();

    let dir = Utf8TempDir::new().expect("tempdir created");
    let path = dir.path().join("patchgrade.toml");
    std::fs::write(
        &path,
        indoc! {r#"
            default-dialect = "bracket-tag"

            [dialects]
            "acme/widgets" = "unittest"

            [grading]
            include-raw-log = false
            include-tests-status = true
            calculate-to-fail = true
            unknown-key = 1
        "#},
    )
    .expect("config written");

    let config = GradingConfig::from_sources(Some(&path)).expect("config is valid");
    assert_eq!(
        *config.dialects(),
        btreemap! { "acme/widgets".to_owned() => LogDialect::UnitTest }
    );

    let registry = config.registry();
    let grader = Grader::new(&registry);
    let options = config.grade_options(ResolutionMode::Standard);

    let log = indoc! {"
        >>>>> Applied Patch (pred)
        test_fixed (widgets.tests.WidgetTests) ... ok
        test_still_broken (widgets.tests.WidgetTests) ... FAIL
    "};
    let mut gold = GoldPartitions::new(["test_fixed (widgets.tests.WidgetTests)"], []);
    gold.fail_to_fail = vec!["test_still_broken (widgets.tests.WidgetTests)".to_owned()];

    let report = grader.evaluate("acme__widgets-42", Some(PATCH), log, &gold, &options);
    assert!(report.resolved);
    assert_eq!(report.raw_log_content, None);
    let tests_status = report.tests_status.expect("tests status attached");
    assert_eq!(tests_status.resolution_status, ResolvedStatus::Full);
    assert_eq!(
        tests_status.buckets.fail_to_fail.failure,
        ["test_still_broken (widgets.tests.WidgetTests)"]
    );

    // Unregistered projects use the configured default.
    let log = ">>>>> Applied Patch (pred)\nFAILED   test_gadget\n";
    let gold = GoldPartitions::new(["test_gadget"], []);
    let report = grader.evaluate("acme__gadgets-7", Some(PATCH), log, &gold, &options);
    assert!(report.patch_successfully_applied);
    assert!(!report.resolved);
}
