// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker lines written by the evaluation harness into test transcripts.
//!
//! The harness brackets each phase of an evaluation run (resetting the environment, applying
//! patches, running tests) with a marker line. Some of these markers signal that the run is not
//! usable for grading; the others are informational. All of them are matched as case-sensitive
//! substrings against the full transcript.

use std::fmt;

/// A marker line emitted by the evaluation harness.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LogMarker {
    /// A patch could not be applied.
    ApplyPatchFail,

    /// A patch was applied. Followed by ` (<patch type>)`, e.g. ` (pred)`.
    ApplyPatchPass,

    /// Environment initialization failed.
    InstallFail,

    /// Environment initialization succeeded.
    InstallPass,

    /// Environment initialization timed out.
    InstallTimeout,

    /// Resetting the repository to its base commit failed.
    ResetFailed,

    /// The test command errored out.
    TestsError,

    /// The test command ran and some tests failed.
    TestsFailed,

    /// The test command ran and all tests passed.
    TestsPassed,

    /// The test command timed out.
    TestsTimeout,
}

impl LogMarker {
    /// Markers whose presence anywhere in a transcript means the run must not be graded.
    pub const GATING: [LogMarker; 4] = [
        LogMarker::ApplyPatchFail,
        LogMarker::ResetFailed,
        LogMarker::TestsError,
        LogMarker::TestsTimeout,
    ];

    /// Returns the exact marker text.
    pub fn as_str(self) -> &'static str {
        match self {
            LogMarker::ApplyPatchFail => ">>>>> Patch Apply Failed",
            LogMarker::ApplyPatchPass => ">>>>> Applied Patch",
            LogMarker::InstallFail => ">>>>> Init Failed",
            LogMarker::InstallPass => ">>>>> Init Succeeded",
            LogMarker::InstallTimeout => ">>>>> Init Timed Out",
            LogMarker::ResetFailed => ">>>>> Reset Failed",
            LogMarker::TestsError => ">>>>> Tests Errored",
            LogMarker::TestsFailed => ">>>>> Some Tests Failed",
            LogMarker::TestsPassed => ">>>>> All Tests Passed",
            LogMarker::TestsTimeout => ">>>>> Tests Timed Out",
        }
    }

    /// Returns true if this marker prevents a transcript from being graded.
    pub fn is_gating(self) -> bool {
        Self::GATING.contains(&self)
    }
}

impl fmt::Display for LogMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Written by older harness versions when the task environment could not be reset. Treated the
/// same as [`LogMarker::ResetFailed`].
pub const RESET_TASK_ENV_FAILED: &str = "Failed to reset task environment";

/// Marker written after the predicted patch is applied. Everything up to and including its last
/// occurrence is baseline output.
pub const PRED_PATCH_APPLIED: &str = ">>>>> Applied Patch (pred)";

/// Phrase expected (case-insensitively) in every well-formed transcript from the harness
/// generation that uses undotted instance IDs.
pub const APPLIED_PATCH_PHRASE: &str = "applied patch";
