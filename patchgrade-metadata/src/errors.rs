// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{ResolvedStatus, TestStatus};
use std::{error, fmt};

/// An error that occurs while parsing a [`TestStatus`] from a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestStatusParseError {
    input: String,
}

impl TestStatusParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for TestStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unrecognized test status: {}\n(known values: {})",
            self.input,
            TestStatus::variants().join(", "),
        )
    }
}

impl error::Error for TestStatusParseError {}

/// An error that occurs while parsing a [`ResolvedStatus`] from a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedStatusParseError {
    input: String,
}

impl ResolvedStatusParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

impl fmt::Display for ResolvedStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unrecognized resolution status: {}\n(known values: {})",
            self.input,
            ResolvedStatus::variants().join(", "),
        )
    }
}

impl error::Error for ResolvedStatusParseError {}

/// An error that occurs while decoding gold data from a dataset row.
#[derive(Debug)]
pub struct GoldSpecError {
    err: serde_json::Error,
}

impl GoldSpecError {
    pub(crate) fn new(err: serde_json::Error) -> Self {
        Self { err }
    }
}

impl fmt::Display for GoldSpecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to decode gold data row")
    }
}

impl error::Error for GoldSpecError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.err)
    }
}
