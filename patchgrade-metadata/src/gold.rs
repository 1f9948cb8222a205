// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::GoldSpecError;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// One of the four gold partitions of test cases.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TestCategory {
    /// Tests that fail before the gold patch and pass after it.
    FailToPass,

    /// Tests that pass both before and after the gold patch.
    PassToPass,

    /// Tests that fail both before and after the gold patch.
    FailToFail,

    /// Tests that pass before the gold patch and fail after it.
    PassToFail,
}

impl TestCategory {
    /// All categories, in report order.
    pub const ALL: [TestCategory; 4] = [
        TestCategory::FailToPass,
        TestCategory::PassToPass,
        TestCategory::FailToFail,
        TestCategory::PassToFail,
    ];

    /// Returns the key used for this category in gold data and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            TestCategory::FailToPass => "FAIL_TO_PASS",
            TestCategory::PassToPass => "PASS_TO_PASS",
            TestCategory::FailToFail => "FAIL_TO_FAIL",
            TestCategory::PassToFail => "PASS_TO_FAIL",
        }
    }

    /// Returns true for the categories that only feed informational metrics.
    pub fn is_to_fail(self) -> bool {
        matches!(self, TestCategory::FailToFail | TestCategory::PassToFail)
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four gold partitions for an instance.
///
/// Order is preserved and duplicates are kept as-is.
///
/// Dataset rows store each partition either as a JSON array or as a string containing a JSON
/// array; both forms are accepted when deserializing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct GoldPartitions {
    /// Tests the fix must make pass.
    #[serde(rename = "FAIL_TO_PASS", deserialize_with = "deserialize_test_list")]
    pub fail_to_pass: Vec<String>,

    /// Tests the fix must keep passing.
    #[serde(rename = "PASS_TO_PASS", deserialize_with = "deserialize_test_list")]
    pub pass_to_pass: Vec<String>,

    /// Tests that keep failing with the gold patch.
    #[serde(
        rename = "FAIL_TO_FAIL",
        default,
        deserialize_with = "deserialize_test_list"
    )]
    pub fail_to_fail: Vec<String>,

    /// Tests that start failing with the gold patch.
    #[serde(
        rename = "PASS_TO_FAIL",
        default,
        deserialize_with = "deserialize_test_list"
    )]
    pub pass_to_fail: Vec<String>,
}

impl GoldPartitions {
    /// Creates partitions with only fail-to-pass and pass-to-pass tests.
    pub fn new<F, P, S>(fail_to_pass: F, pass_to_pass: P) -> Self
    where
        F: IntoIterator<Item = S>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fail_to_pass: fail_to_pass.into_iter().map(Into::into).collect(),
            pass_to_pass: pass_to_pass.into_iter().map(Into::into).collect(),
            fail_to_fail: Vec::new(),
            pass_to_fail: Vec::new(),
        }
    }

    /// Returns the test cases in the given category.
    pub fn get(&self, category: TestCategory) -> &[String] {
        match category {
            TestCategory::FailToPass => &self.fail_to_pass,
            TestCategory::PassToPass => &self.pass_to_pass,
            TestCategory::FailToFail => &self.fail_to_fail,
            TestCategory::PassToFail => &self.pass_to_fail,
        }
    }
}

fn deserialize_test_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TestList {
        List(Vec<String>),
        Encoded(String),
    }

    match TestList::deserialize(deserializer)? {
        TestList::List(list) => Ok(list),
        TestList::Encoded(encoded) => serde_json::from_str(&encoded).map_err(|err| {
            de::Error::custom(format!("test list string is not a JSON array: {err}"))
        }),
    }
}

/// The shape in which gold data reached the grader.
///
/// Harness-built test specs expose their partitions as attributes; raw dataset rows are plain
/// mappings. The two shapes come from different harness generations that grade differently, which
/// is why the shape is kept around.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum GoldShape {
    /// A harness-built test spec.
    Attributes,

    /// A raw dataset row.
    Mapping,
}

/// Gold data for one instance: its identifier and the four partitions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoldSpec {
    /// The instance identifier.
    pub instance_id: String,

    /// The gold partitions.
    pub partitions: GoldPartitions,

    /// The shape the gold data arrived in.
    pub shape: GoldShape,
}

#[derive(Deserialize)]
struct GoldRow {
    instance_id: String,
    #[serde(flatten)]
    partitions: GoldPartitions,
}

impl GoldSpec {
    /// Creates gold data from a harness-built test spec.
    pub fn attributes(instance_id: impl Into<String>, partitions: GoldPartitions) -> Self {
        Self {
            instance_id: instance_id.into(),
            partitions,
            shape: GoldShape::Attributes,
        }
    }

    /// Creates gold data from a raw dataset row.
    pub fn mapping(instance_id: impl Into<String>, partitions: GoldPartitions) -> Self {
        Self {
            instance_id: instance_id.into(),
            partitions,
            shape: GoldShape::Mapping,
        }
    }

    /// Decodes a raw dataset row from JSON. Keys other than `instance_id` and the partition names
    /// are ignored.
    pub fn from_json_row(json: &str) -> Result<Self, GoldSpecError> {
        let row: GoldRow = serde_json::from_str(json).map_err(GoldSpecError::new)?;
        Ok(Self::mapping(row.instance_id, row.partitions))
    }
}

/// A model prediction for one instance.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    /// The instance this prediction is for.
    pub instance_id: String,

    /// The model that produced the patch.
    #[serde(default)]
    pub model_name_or_path: Option<String>,

    /// The predicted patch, or `None` if the model produced nothing.
    pub model_patch: Option<String>,
}

impl Prediction {
    /// Creates a new prediction.
    pub fn new(instance_id: impl Into<String>, model_patch: Option<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            model_name_or_path: None,
            model_patch,
        }
    }
}
