// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log parsers for the test-runner output dialects seen in evaluation transcripts.
//!
//! Each dialect turns a transcript into a [`StatusMap`]. Parsing is total and best-effort: lines
//! that don't match a dialect's rules are skipped, and a transcript with nothing recognizable
//! produces an empty map. When several lines mention the same test case, the last one wins.

mod custom;
mod pytest;
mod unittest;

use crate::errors::UnknownDialectError;
use patchgrade_metadata::StatusMap;
use std::{fmt, str::FromStr};

/// A test-runner output dialect.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LogDialect {
    /// `STATUS test_id` lines, as in pytest's `-rA` summary. Also accepts the older
    /// `test_id - STATUS` ordering. This is the fallback for unknown projects.
    Pytest,

    /// [`Pytest`](Self::Pytest), after stripping ANSI color codes and control characters from each
    /// line.
    PytestAnsi,

    /// [`Pytest`](Self::Pytest), with absolute paths in parametrized test names collapsed to their
    /// final segment.
    PytestOptions,

    /// unittest/Django-style `test_id ... ok` lines and `FAIL:`/`ERROR:` headers.
    UnitTest,

    /// Lines matching `^(PASSED|FAILED)\s+(.*)`, where everything after the status is the test id.
    BracketTag,

    /// pytest output with mixed field order, as produced by seaborn's test setup.
    Seaborn,

    /// sympy's `bin/test` output: failure banners plus `test_name ok|F|E` lines.
    Sympy,

    /// [`Pytest`](Self::Pytest), with `MouseButton` enum values rendered as numbers first.
    Matplotlib,
}

impl LogDialect {
    /// All dialects.
    pub const ALL: [LogDialect; 8] = [
        LogDialect::Pytest,
        LogDialect::PytestAnsi,
        LogDialect::PytestOptions,
        LogDialect::UnitTest,
        LogDialect::BracketTag,
        LogDialect::Seaborn,
        LogDialect::Sympy,
        LogDialect::Matplotlib,
    ];

    /// The dialect used when nothing more specific is known.
    pub const FALLBACK: LogDialect = LogDialect::Pytest;

    /// Returns the name of this dialect, as used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            LogDialect::Pytest => "pytest",
            LogDialect::PytestAnsi => "pytest-ansi",
            LogDialect::PytestOptions => "pytest-options",
            LogDialect::UnitTest => "unittest",
            LogDialect::BracketTag => "bracket-tag",
            LogDialect::Seaborn => "seaborn",
            LogDialect::Sympy => "sympy",
            LogDialect::Matplotlib => "matplotlib",
        }
    }

    /// Returns the names of all dialects.
    pub fn variants() -> [&'static str; 8] {
        Self::ALL.map(Self::name)
    }

    /// Parses a transcript into a status map.
    pub fn parse(self, log: &str) -> StatusMap {
        match self {
            LogDialect::Pytest => pytest::parse_pytest(log),
            LogDialect::PytestAnsi => pytest::parse_pytest_ansi(log),
            LogDialect::PytestOptions => pytest::parse_pytest_options(log),
            LogDialect::UnitTest => unittest::parse_unittest(log),
            LogDialect::BracketTag => custom::parse_bracket_tag(log),
            LogDialect::Seaborn => custom::parse_seaborn(log),
            LogDialect::Sympy => custom::parse_sympy(log),
            LogDialect::Matplotlib => pytest::parse_matplotlib(log),
        }
    }
}

impl fmt::Display for LogDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogDialect {
    type Err = UnknownDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.name() == s)
            .ok_or_else(|| UnknownDialectError::new(s))
    }
}
