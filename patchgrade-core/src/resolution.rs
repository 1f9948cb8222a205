// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning classification buckets into a resolution verdict.

use patchgrade_metadata::{ClassificationBucket, GoldShape, PartitionBuckets, ResolvedStatus};
use std::fmt;

/// How pass-to-pass results factor into the verdict.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ResolutionMode {
    /// Both fail-to-pass and pass-to-pass must be fully successful for a full resolution, and
    /// pass-to-pass must be fully successful for a partial one.
    #[default]
    Standard,

    /// Only fail-to-pass is considered.
    Reduced,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Standard => write!(f, "standard"),
            ResolutionMode::Reduced => write!(f, "reduced"),
        }
    }
}

impl ResolutionMode {
    /// Returns the mode that the shape of the gold data has historically implied: harness-built
    /// test specs are graded in standard mode, raw dataset rows in reduced mode.
    pub fn for_gold_shape(shape: GoldShape) -> Self {
        match shape {
            GoldShape::Attributes => ResolutionMode::Standard,
            GoldShape::Mapping => ResolutionMode::Reduced,
        }
    }
}

/// The success rate of one partition, kept as exact counts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rate {
    success: usize,
    total: usize,
}

impl Rate {
    /// Computes the rate for a bucket.
    pub fn of(bucket: &ClassificationBucket) -> Self {
        Self {
            success: bucket.success.len(),
            total: bucket.total(),
        }
    }

    /// Returns true if every classified test succeeded. An empty partition is vacuously complete.
    pub fn is_complete(self) -> bool {
        self.success == self.total
    }

    /// Returns true if nothing succeeded in a non-empty partition.
    pub fn is_zero(self) -> bool {
        self.total > 0 && self.success == 0
    }

    /// Returns the rate as a fraction between 0 and 1. An empty partition has a rate of 1.
    pub fn as_f64(self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.success as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.success, self.total)
    }
}

/// Returns the fail-to-pass rate.
pub fn fail_to_pass_rate(buckets: &PartitionBuckets) -> Rate {
    Rate::of(&buckets.fail_to_pass)
}

/// Returns the pass-to-pass rate.
pub fn pass_to_pass_rate(buckets: &PartitionBuckets) -> Rate {
    Rate::of(&buckets.pass_to_pass)
}

/// Computes the verdict for a set of buckets. Fail-to-fail and pass-to-fail never matter.
pub fn resolution_status(buckets: &PartitionBuckets, mode: ResolutionMode) -> ResolvedStatus {
    let f2p = fail_to_pass_rate(buckets);
    let p2p_complete = match mode {
        ResolutionMode::Standard => pass_to_pass_rate(buckets).is_complete(),
        ResolutionMode::Reduced => true,
    };

    if !p2p_complete {
        ResolvedStatus::No
    } else if f2p.is_complete() {
        ResolvedStatus::Full
    } else if f2p.is_zero() {
        ResolvedStatus::No
    } else {
        ResolvedStatus::Partial
    }
}
