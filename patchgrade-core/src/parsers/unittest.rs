// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! unittest-style output, as printed by `python -m unittest -v` and Django's test runner.

use patchgrade_metadata::{StatusMap, TestStatus};

const RESULT_SUFFIXES: [(&str, TestStatus); 3] = [
    (" ... ok", TestStatus::Passed),
    (" ... FAIL", TestStatus::Failed),
    (" ... ERROR", TestStatus::Error),
];
const SKIPPED_SEPARATOR: &str = " ... skipped";

pub(super) fn parse_unittest(log: &str) -> StatusMap {
    let mut statuses = StatusMap::new();
    // The most recent `name ... ` line. Tests that print output have their result on a later
    // line of its own.
    let mut pending: Option<&str> = None;

    for line in log.lines() {
        let line = line.trim();

        if let Some((test_case, _)) = line.split_once(" ... ") {
            pending = Some(test_case.trim());
        }

        for (suffix, status) in RESULT_SUFFIXES {
            if let Some(test_case) = line.strip_suffix(suffix) {
                statuses.insert(test_case.trim(), status);
            }
        }

        if let Some((test_case, _)) = line.split_once(SKIPPED_SEPARATOR) {
            statuses.insert(test_case.trim(), TestStatus::Skipped);
        }

        if let Some((test_case, status)) = parse_header(line) {
            statuses.insert(test_case, status);
        }

        if line == "ok"
            && let Some(test_case) = pending
        {
            statuses.insert(test_case, TestStatus::Passed);
        }
    }

    statuses
}

/// Parses the header printed above a failure's traceback.
///
/// `ERROR: name` and `FAIL: name` keep the full remainder. The older space-delimited forms
/// (`ERROR name (details)`) drop a trailing parenthetical.
fn parse_header(line: &str) -> Option<(&str, TestStatus)> {
    let (rest, status, legacy) = if let Some(rest) = line.strip_prefix("ERROR:") {
        (rest, TestStatus::Error, false)
    } else if let Some(rest) = line.strip_prefix("FAIL:") {
        (rest, TestStatus::Failed, false)
    } else if let Some(rest) = line.strip_prefix("ERROR ") {
        (rest, TestStatus::Error, true)
    } else if let Some(rest) = line.strip_prefix("FAIL ") {
        (rest, TestStatus::Failed, true)
    } else {
        return None;
    };

    let mut test_case = rest.trim();
    if legacy
        && test_case.ends_with(')')
        && let Some(open) = test_case.rfind('(')
    {
        test_case = test_case[..open].trim_end();
    }

    (!test_case.is_empty()).then_some((test_case, status))
}
