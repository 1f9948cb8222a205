// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! pytest-style `STATUS test_id` parsing and its variants.

use patchgrade_metadata::{StatusMap, TestStatus};
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};
use tracing::trace;

static ANSI_COLOR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)m").expect("ANSI color code regex is valid"));
static PARAMETRIZED_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*?)\[(.*)\]").expect("parametrized option regex is valid"));

pub(super) fn parse_pytest(log: &str) -> StatusMap {
    log.lines().filter_map(parse_status_line).collect()
}

pub(super) fn parse_pytest_ansi(log: &str) -> StatusMap {
    log.lines()
        .filter_map(|line| parse_status_line(&strip_terminal_codes(line)))
        .collect()
}

pub(super) fn parse_pytest_options(log: &str) -> StatusMap {
    log.lines()
        .filter_map(parse_status_line)
        .map(|(test_case, status)| (normalize_option_path(&test_case).into_owned(), status))
        .collect()
}

pub(super) fn parse_matplotlib(log: &str) -> StatusMap {
    log.lines()
        .filter_map(|line| {
            let line = line
                .replace("MouseButton.LEFT", "1")
                .replace("MouseButton.RIGHT", "3");
            parse_status_line(&line)
        })
        .collect()
}

/// Parses a single line in the generic line-status format.
///
/// * `STATUS test_id [...]`: the first two whitespace-separated tokens. For `FAILED` lines the
///   first ` - ` is dropped before splitting.
/// * `test_id - STATUS`: the older ordering, used when the line doesn't start with a status.
fn parse_status_line(line: &str) -> Option<(String, TestStatus)> {
    if let Some(leading) = TestStatus::leading(line) {
        let line = if leading == TestStatus::Failed {
            Cow::Owned(line.replacen(" - ", " ", 1))
        } else {
            Cow::Borrowed(line)
        };
        let mut tokens = line.split_whitespace();
        // The status token must be exactly a keyword: `PASSEDtest_x` or `ERRORS` don't count.
        let token = tokens.next()?;
        let Ok(status) = token.parse::<TestStatus>() else {
            trace!("skipping line starting with {leading}: `{token}` is not a status: {line}");
            return None;
        };
        let test_case = tokens.next()?;
        return Some((test_case.to_owned(), status));
    }

    let (test_case, status) = line.rsplit_once(" - ")?;
    let status = status.trim().parse::<TestStatus>().ok()?;
    let test_case = test_case.trim();
    if test_case.is_empty() {
        return None;
    }
    Some((test_case.to_owned(), status))
}

/// Removes ANSI escape sequences, bare `[NNm` color codes left behind by partially captured
/// escapes, and control characters 1 through 31.
fn strip_terminal_codes(line: &str) -> String {
    let line = strip_ansi_escapes::strip_str(line);
    let line = ANSI_COLOR_CODE.replace_all(&line, "");
    line.chars().filter(|&c| !('\u{1}'..='\u{1f}').contains(&c)).collect()
}

/// Collapses a machine-local absolute path in a parametrized test name to its last segment, so
/// that `test_x[/home/user/data.csv]` and `test_x[/tmp/data.csv]` both become `test_x[/data.csv]`.
///
/// Options that aren't absolute paths, that start with `//`, or that contain a `*` are kept as-is.
fn normalize_option_path(test_case: &str) -> Cow<'_, str> {
    let Some(captures) = PARAMETRIZED_OPTION.captures(test_case) else {
        return Cow::Borrowed(test_case);
    };
    let name = &captures[1];
    let option = &captures[2];

    let option = if option.starts_with('/') && !option.starts_with("//") && !option.contains('*')
    {
        let last = option.rsplit('/').next().unwrap_or_default();
        Cow::Owned(format!("/{last}"))
    } else {
        Cow::Borrowed(option)
    };
    Cow::Owned(format!("{name}[{option}]"))
}
