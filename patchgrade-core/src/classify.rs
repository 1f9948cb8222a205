// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifying gold partitions against a parsed status map.

use patchgrade_metadata::{
    ClassificationBucket, GoldPartitions, PartitionBuckets, StatusMap, TestCategory,
};

/// Splits a partition into passing and failing test cases, keeping order and duplicates.
///
/// Test cases missing from `statuses` are failures. Skipped test cases are in neither list, so
/// `success.len() + failure.len()` is less than `partition.len()` exactly when some test cases
/// were skipped.
pub fn classify<S: AsRef<str>>(partition: &[S], statuses: &StatusMap) -> ClassificationBucket {
    let mut bucket = ClassificationBucket::default();
    for test_case in partition {
        let test_case = test_case.as_ref();
        if statuses.test_passed(test_case) {
            bucket.success.push(test_case.to_owned());
        } else if statuses.test_failed(test_case) {
            bucket.failure.push(test_case.to_owned());
        }
    }
    bucket
}

/// Classifies the gold partitions.
///
/// Fail-to-fail and pass-to-fail are only classified if `calculate_to_fail` is set; otherwise
/// their buckets are left empty.
pub fn classify_partitions(
    statuses: &StatusMap,
    gold: &GoldPartitions,
    calculate_to_fail: bool,
) -> PartitionBuckets {
    let mut buckets = PartitionBuckets::default();
    for category in TestCategory::ALL {
        if category.is_to_fail() && !calculate_to_fail {
            continue;
        }
        *buckets.get_mut(category) = classify(gold.get(category), statuses);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchgrade_metadata::TestStatus;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_strategy::proptest;

    fn statuses() -> StatusMap {
        [
            ("a", TestStatus::Passed),
            ("b", TestStatus::Failed),
            ("c", TestStatus::Skipped),
            ("d", TestStatus::Xfail),
            ("e", TestStatus::Error),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn buckets_keep_order_and_duplicates() {
        let bucket = classify(&["e", "a", "missing", "c", "a", "d", "b"], &statuses());
        assert_eq!(bucket.success, ["a", "a", "d"]);
        assert_eq!(bucket.failure, ["e", "missing", "b"]);
    }

    #[test]
    fn missing_pass_to_pass_test_is_a_failure() {
        let gold = GoldPartitions::new(vec![], vec!["tests/test_gone.py::test_x"]);
        let buckets = classify_partitions(&StatusMap::new(), &gold, false);
        assert_eq!(buckets.pass_to_pass.failure, ["tests/test_gone.py::test_x"]);
        assert!(buckets.pass_to_pass.success.is_empty());
    }

    #[test]
    fn to_fail_only_on_request() {
        let gold = GoldPartitions {
            fail_to_pass: vec!["a".to_owned()],
            pass_to_pass: vec!["b".to_owned()],
            fail_to_fail: vec!["a".to_owned(), "b".to_owned()],
            pass_to_fail: vec!["e".to_owned()],
        };

        let without = classify_partitions(&statuses(), &gold, false);
        assert_eq!(without.fail_to_fail, ClassificationBucket::default());
        assert_eq!(without.pass_to_fail, ClassificationBucket::default());

        let with = classify_partitions(&statuses(), &gold, true);
        assert_eq!(with.fail_to_pass, without.fail_to_pass);
        assert_eq!(with.fail_to_fail.success, ["a"]);
        assert_eq!(with.fail_to_fail.failure, ["b"]);
        assert_eq!(with.pass_to_fail.failure, ["e"]);
    }

    fn arb_status() -> impl Strategy<Value = Option<TestStatus>> {
        proptest::option::of(proptest::sample::select(TestStatus::ALL.to_vec()))
    }

    #[proptest(cases = 128)]
    fn bucket_sizes(
        #[strategy(proptest::collection::vec(("[a-e]", arb_status()), 0..12))] entries: Vec<(
            String,
            Option<TestStatus>,
        )>,
        #[strategy(proptest::collection::vec("[a-g]", 0..12))] partition: Vec<String>,
    ) {
        let statuses: StatusMap = entries
            .into_iter()
            .filter_map(|(test_case, status)| Some((test_case, status?)))
            .collect();
        let bucket = classify(&partition, &statuses);

        let skipped = partition
            .iter()
            .filter(|test_case| statuses.get(test_case) == Some(TestStatus::Skipped))
            .count();
        prop_assert_eq!(bucket.total() + skipped, partition.len());
    }
}
