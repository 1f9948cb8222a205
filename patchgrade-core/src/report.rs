// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembling evaluation reports.
//!
//! [`Grader`] runs the whole pipeline for one instance: the gate, the log parser chosen for the
//! instance's project, the partition classifier and the resolution decider. A missing patch and a
//! rejected transcript end grading early; both are ordinary outcomes recorded in the report.

use crate::{
    classify::classify_partitions,
    gate::{self, GateOutcome},
    registry::DialectRegistry,
    resolution::{ResolutionMode, fail_to_pass_rate, pass_to_pass_rate, resolution_status},
};
use patchgrade_metadata::{
    EvaluationReport, GoldPartitions, GoldSpec, Prediction, ReportMap, ResolvedStatus, TestsStatus,
};
use tracing::{debug, warn};

/// Options for grading a single instance.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct GradeOptions {
    /// How the verdict is computed.
    pub mode: ResolutionMode,

    /// Attach the per-partition buckets and the verdict to the report.
    pub include_tests_status: bool,

    /// Attach the transcript that was parsed to the report.
    pub include_raw_log: bool,

    /// Also classify the fail-to-fail and pass-to-fail partitions.
    pub calculate_to_fail: bool,
}

impl GradeOptions {
    /// Creates options for the given mode, with everything else turned off.
    pub fn new(mode: ResolutionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Sets whether per-partition detail is attached.
    pub fn with_include_tests_status(mut self, include_tests_status: bool) -> Self {
        self.include_tests_status = include_tests_status;
        self
    }

    /// Sets whether the parsed transcript is attached.
    pub fn with_include_raw_log(mut self, include_raw_log: bool) -> Self {
        self.include_raw_log = include_raw_log;
        self
    }

    /// Sets whether the to-fail partitions are classified.
    pub fn with_calculate_to_fail(mut self, calculate_to_fail: bool) -> Self {
        self.calculate_to_fail = calculate_to_fail;
        self
    }
}

/// Grades transcripts against gold data.
///
/// A grader only borrows its registry, so many instances can be graded in parallel from one
/// registry.
#[derive(Copy, Clone, Debug)]
pub struct Grader<'r> {
    registry: &'r DialectRegistry,
}

impl<'r> Grader<'r> {
    /// Creates a grader that selects dialects from `registry`.
    pub fn new(registry: &'r DialectRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry this grader selects dialects from.
    pub fn registry(&self) -> &'r DialectRegistry {
        self.registry
    }

    /// Grades one prediction, returning a map with a single entry keyed by the prediction's
    /// instance ID.
    pub fn grade(
        &self,
        prediction: &Prediction,
        gold: &GoldSpec,
        transcript: &str,
        options: &GradeOptions,
    ) -> ReportMap {
        if prediction.instance_id != gold.instance_id {
            warn!(
                "prediction is for {} but gold data is for {}, grading as {}",
                prediction.instance_id, gold.instance_id, prediction.instance_id,
            );
        }

        let report = self.evaluate(
            &prediction.instance_id,
            prediction.model_patch.as_deref(),
            transcript,
            &gold.partitions,
            options,
        );
        ReportMap::single(prediction.instance_id.clone(), report)
    }

    /// Grades one instance.
    pub fn evaluate(
        &self,
        instance_id: &str,
        patch: Option<&str>,
        transcript: &str,
        gold: &GoldPartitions,
        options: &GradeOptions,
    ) -> EvaluationReport {
        let mut report = EvaluationReport::default();

        if patch.is_none() {
            debug!("instance {instance_id}: no patch");
            report.patch_is_none = true;
            return report;
        }
        report.patch_exists = true;

        let transcript = match gate::check(transcript, instance_id) {
            GateOutcome::Passed { transcript } => transcript,
            GateOutcome::Rejected { reason, .. } => {
                debug!("instance {instance_id}: transcript rejected ({reason})");
                return report;
            }
        };
        report.patch_successfully_applied = true;
        if options.include_raw_log {
            report.raw_log_content = Some(transcript.to_owned());
        }

        let dialect = self.registry.select(instance_id);
        let statuses = dialect.parse(transcript);
        let buckets = classify_partitions(&statuses, gold, options.calculate_to_fail);

        let verdict = resolution_status(&buckets, options.mode);
        debug!(
            "instance {instance_id}: {verdict} (fail-to-pass {}, pass-to-pass {}, {} mode)",
            fail_to_pass_rate(&buckets),
            pass_to_pass_rate(&buckets),
            options.mode,
        );
        report.resolved = verdict == ResolvedStatus::Full;

        if options.include_tests_status {
            report.tests_status = Some(TestsStatus {
                buckets,
                resolution_status: verdict,
            });
        }
        report
    }
}

impl Default for Grader<'static> {
    fn default() -> Self {
        Self::new(DialectRegistry::builtin())
    }
}
