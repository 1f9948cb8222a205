// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::TestStatus;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A map from test case identifiers to the status parsed out of a single transcript.
///
/// Identifiers are compared by exact string equality. Entries are kept in first-seen order;
/// recording a status for an identifier that is already present replaces the status in place.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StatusMap {
    statuses: IndexMap<String, TestStatus>,
}

impl StatusMap {
    /// Creates an empty status map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a status for a test case, returning the previous status if there was one.
    pub fn insert(&mut self, test_case: impl Into<String>, status: TestStatus) -> Option<TestStatus> {
        self.statuses.insert(test_case.into(), status)
    }

    /// Returns the status recorded for a test case.
    pub fn get(&self, test_case: &str) -> Option<TestStatus> {
        self.statuses.get(test_case).copied()
    }

    /// Returns true if a status was recorded for this test case.
    pub fn contains(&self, test_case: &str) -> bool {
        self.statuses.contains_key(test_case)
    }

    /// Returns the number of test cases recorded.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns true if no test cases were recorded.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Iterates over test cases and their statuses in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TestStatus)> + '_ {
        self.statuses
            .iter()
            .map(|(test_case, status)| (test_case.as_str(), *status))
    }

    /// Returns true if the test case is present and passed (or failed as expected).
    pub fn test_passed(&self, test_case: &str) -> bool {
        self.get(test_case).is_some_and(TestStatus::is_pass)
    }

    /// Returns true if the test case is missing, failed or errored.
    ///
    /// A test case that does not show up in the transcript at all counts as a failure.
    pub fn test_failed(&self, test_case: &str) -> bool {
        self.get(test_case).is_none_or(TestStatus::is_fail)
    }
}

impl<S: Into<String>> FromIterator<(S, TestStatus)> for StatusMap {
    fn from_iter<T: IntoIterator<Item = (S, TestStatus)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<S: Into<String>> Extend<(S, TestStatus)> for StatusMap {
    fn extend<T: IntoIterator<Item = (S, TestStatus)>>(&mut self, iter: T) {
        for (test_case, status) in iter {
            self.insert(test_case, status);
        }
    }
}
