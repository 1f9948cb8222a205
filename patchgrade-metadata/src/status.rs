// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{ResolvedStatusParseError, TestStatusParseError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The outcome of a single test case, as reported by a test runner.
///
/// The string forms (`PASSED`, `FAILED`, ...) are the exact keywords that log parsers look for at
/// the start of a line, so they must not change.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    /// The test failed.
    Failed,

    /// The test passed.
    Passed,

    /// The test was skipped.
    Skipped,

    /// The test errored out before producing a pass/fail result.
    Error,

    /// The test was expected to fail, and did.
    Xfail,
}

impl TestStatus {
    /// All statuses, in the order in which line prefixes are tried.
    pub const ALL: [TestStatus; 5] = [
        TestStatus::Failed,
        TestStatus::Passed,
        TestStatus::Skipped,
        TestStatus::Error,
        TestStatus::Xfail,
    ];

    /// Returns the canonical string form of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Failed => "FAILED",
            TestStatus::Passed => "PASSED",
            TestStatus::Skipped => "SKIPPED",
            TestStatus::Error => "ERROR",
            TestStatus::Xfail => "XFAIL",
        }
    }

    /// Returns the string forms of all statuses.
    pub fn variants() -> [&'static str; 5] {
        Self::ALL.map(Self::as_str)
    }

    /// Returns the status whose keyword `line` starts with, if any.
    ///
    /// This is a plain prefix check: `ERRORS` starts with `ERROR`.
    pub fn leading(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| line.starts_with(status.as_str()))
    }

    /// Returns true if this status counts as a pass when grading.
    pub fn is_pass(self) -> bool {
        matches!(self, TestStatus::Passed | TestStatus::Xfail)
    }

    /// Returns true if this status counts as a failure when grading.
    ///
    /// `Skipped` is neither a pass nor a failure.
    pub fn is_fail(self) -> bool {
        matches!(self, TestStatus::Failed | TestStatus::Error)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = TestStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TestStatusParseError::new(s))
    }
}

/// The resolution verdict for a graded instance.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum ResolvedStatus {
    /// None of the fail-to-pass tests were fixed, or a pass-to-pass test regressed.
    #[serde(rename = "RESOLVED_NO")]
    No,

    /// Some, but not all, of the fail-to-pass tests were fixed.
    #[serde(rename = "RESOLVED_PARTIAL")]
    Partial,

    /// All of the fail-to-pass tests were fixed.
    #[serde(rename = "RESOLVED_FULL")]
    Full,
}

impl ResolvedStatus {
    /// Returns the string form of this verdict.
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedStatus::No => "RESOLVED_NO",
            ResolvedStatus::Partial => "RESOLVED_PARTIAL",
            ResolvedStatus::Full => "RESOLVED_FULL",
        }
    }

    /// Returns the string forms of all verdicts.
    pub fn variants() -> [&'static str; 3] {
        [
            ResolvedStatus::No.as_str(),
            ResolvedStatus::Partial.as_str(),
            ResolvedStatus::Full.as_str(),
        ]
    }
}

impl fmt::Display for ResolvedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolvedStatus {
    type Err = ResolvedStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESOLVED_NO" => Ok(ResolvedStatus::No),
            "RESOLVED_PARTIAL" => Ok(ResolvedStatus::Partial),
            "RESOLVED_FULL" => Ok(ResolvedStatus::Full),
            other => Err(ResolvedStatusParseError::new(other)),
        }
    }
}
