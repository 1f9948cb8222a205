// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{ResolvedStatus, TestCategory};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The test cases of one gold partition, split by how they fared in the transcript.
///
/// Every test case lands in at most one of the two lists. Skipped test cases land in neither.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ClassificationBucket {
    /// Test cases that passed.
    pub success: Vec<String>,

    /// Test cases that failed, errored or were missing from the transcript.
    pub failure: Vec<String>,
}

impl ClassificationBucket {
    /// Returns the number of test cases classified either way.
    pub fn total(&self) -> usize {
        self.success.len() + self.failure.len()
    }
}

/// Classification buckets for all four gold partitions.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct PartitionBuckets {
    /// Fail-to-pass results.
    #[serde(rename = "FAIL_TO_PASS")]
    pub fail_to_pass: ClassificationBucket,

    /// Pass-to-pass results.
    #[serde(rename = "PASS_TO_PASS")]
    pub pass_to_pass: ClassificationBucket,

    /// Fail-to-fail results. Empty unless to-fail metrics were requested.
    #[serde(rename = "FAIL_TO_FAIL")]
    pub fail_to_fail: ClassificationBucket,

    /// Pass-to-fail results. Empty unless to-fail metrics were requested.
    #[serde(rename = "PASS_TO_FAIL")]
    pub pass_to_fail: ClassificationBucket,
}

impl PartitionBuckets {
    /// Returns the bucket for a category.
    pub fn get(&self, category: TestCategory) -> &ClassificationBucket {
        match category {
            TestCategory::FailToPass => &self.fail_to_pass,
            TestCategory::PassToPass => &self.pass_to_pass,
            TestCategory::FailToFail => &self.fail_to_fail,
            TestCategory::PassToFail => &self.pass_to_fail,
        }
    }

    /// Returns a mutable reference to the bucket for a category.
    pub fn get_mut(&mut self, category: TestCategory) -> &mut ClassificationBucket {
        match category {
            TestCategory::FailToPass => &mut self.fail_to_pass,
            TestCategory::PassToPass => &mut self.pass_to_pass,
            TestCategory::FailToFail => &mut self.fail_to_fail,
            TestCategory::PassToFail => &mut self.pass_to_fail,
        }
    }
}

/// Per-partition detail attached to a report on request.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct TestsStatus {
    /// The four classification buckets.
    #[serde(flatten)]
    pub buckets: PartitionBuckets,

    /// The verdict computed from the buckets.
    pub resolution_status: ResolvedStatus,
}

/// The grading result for one instance.
///
/// Field names are part of the serialized format and match what downstream tooling expects.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct EvaluationReport {
    /// The prediction had no patch at all.
    #[serde(rename = "patch_is_None")]
    pub patch_is_none: bool,

    /// The prediction had a patch.
    pub patch_exists: bool,

    /// The transcript passed all infrastructure checks.
    pub patch_successfully_applied: bool,

    /// The instance is fully resolved.
    pub resolved: bool,

    /// The transcript that was parsed, after baseline output was cut off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_log_content: Option<String>,

    /// Per-partition detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests_status: Option<TestsStatus>,
}

/// Reports keyed by instance identifier, in insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ReportMap {
    reports: IndexMap<String, EvaluationReport>,
}

impl ReportMap {
    /// Creates an empty report map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report map containing a single report.
    pub fn single(instance_id: impl Into<String>, report: EvaluationReport) -> Self {
        let mut map = Self::new();
        map.insert(instance_id, report);
        map
    }

    /// Adds a report, replacing any earlier report for the same instance.
    pub fn insert(
        &mut self,
        instance_id: impl Into<String>,
        report: EvaluationReport,
    ) -> Option<EvaluationReport> {
        self.reports.insert(instance_id.into(), report)
    }

    /// Returns the report for an instance.
    pub fn get(&self, instance_id: &str) -> Option<&EvaluationReport> {
        self.reports.get(instance_id)
    }

    /// Returns the number of reports.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns true if there are no reports.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Iterates over instance identifiers and their reports.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EvaluationReport)> + '_ {
        self.reports
            .iter()
            .map(|(instance_id, report)| (instance_id.as_str(), report))
    }

    /// Returns the number of resolved instances.
    pub fn resolved_count(&self) -> usize {
        self.reports.values().filter(|report| report.resolved).count()
    }
}

impl Extend<(String, EvaluationReport)> for ReportMap {
    fn extend<T: IntoIterator<Item = (String, EvaluationReport)>>(&mut self, iter: T) {
        self.reports.extend(iter);
    }
}

impl FromIterator<(String, EvaluationReport)> for ReportMap {
    fn from_iter<T: IntoIterator<Item = (String, EvaluationReport)>>(iter: T) -> Self {
        Self {
            reports: iter.into_iter().collect(),
        }
    }
}
