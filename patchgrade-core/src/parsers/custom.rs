// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialects for projects with their own test output conventions.

use patchgrade_metadata::{StatusMap, TestStatus};
use regex::Regex;
use std::sync::LazyLock;

static BRACKET_TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(PASSED|FAILED)\s+(.*)").expect("bracket tag line regex is valid")
});
// sympy prints one banner per failure: `____ sympy/core/tests/test_x.py:test_y ____`.
static SYMPY_FAILURE_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_+ (\S+)\.py:(\S+) _+").expect("sympy failure banner regex is valid")
});

/// Everything after the status keyword is the test id, so ids may contain spaces.
pub(super) fn parse_bracket_tag(log: &str) -> StatusMap {
    log.lines()
        .filter_map(|line| {
            let captures = BRACKET_TAG_LINE.captures(line)?;
            let status = captures[1].parse::<TestStatus>().ok()?;
            let test_case = captures.get(2)?.as_str();
            (!test_case.is_empty()).then(|| (test_case.to_owned(), status))
        })
        .collect()
}

/// seaborn's CI prints both `STATUS test_id` summary lines and `test_id PASSED [ 10%]` progress
/// lines.
pub(super) fn parse_seaborn(log: &str) -> StatusMap {
    let mut statuses = StatusMap::new();

    for line in log.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if line.starts_with(TestStatus::Failed.as_str()) {
            if let Some(test_case) = tokens.get(1) {
                statuses.insert(*test_case, TestStatus::Failed);
            }
        } else if line.contains(" PASSED ") {
            if let [test_case, "PASSED", ..] = tokens.as_slice() {
                statuses.insert(*test_case, TestStatus::Passed);
            }
        } else if line.starts_with(TestStatus::Passed.as_str()) {
            if let Some(test_case) = tokens.get(1) {
                statuses.insert(*test_case, TestStatus::Passed);
            }
        }
    }

    statuses
}

/// sympy's `bin/test` reports failures as banner blocks at the end of the run and per-test
/// results as `test_name ok|F|E` in verbose mode.
pub(super) fn parse_sympy(log: &str) -> StatusMap {
    let mut statuses = StatusMap::new();

    for captures in SYMPY_FAILURE_BANNER.captures_iter(log) {
        let test_case = format!("{}.py:{}", &captures[1], &captures[2]);
        statuses.insert(test_case, TestStatus::Failed);
    }

    for line in log.lines() {
        let line = line.trim();
        if !line.starts_with("test_") {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(test_case), Some(result)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        let status = match result {
            "E" => TestStatus::Error,
            "ok" => TestStatus::Passed,
            "F" => TestStatus::Failed,
            _ => continue,
        };
        statuses.insert(test_case, status);
    }

    statuses
}
