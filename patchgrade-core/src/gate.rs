// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Infrastructure checks that run before a transcript is parsed.
//!
//! A transcript is only worth parsing if the harness managed to reset the environment, apply the
//! predicted patch and run the tests to completion. Any sign to the contrary rejects the
//! transcript outright, even if it also contains plausible test results.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use patchgrade_metadata::{
    LogMarker,
    markers::{APPLIED_PATCH_PHRASE, PRED_PATCH_APPLIED, RESET_TASK_ENV_FAILED},
};
use std::{fmt, sync::LazyLock};

/// Patterns that reject a transcript, in [`GateFailure`] order. The last entry is
/// [`RESET_TASK_ENV_FAILED`].
static REJECT_PATTERNS: LazyLock<AhoCorasick> = LazyLock::new(|| {
    let patterns = LogMarker::GATING
        .iter()
        .map(|marker| marker.as_str())
        .chain(std::iter::once(RESET_TASK_ENV_FAILED));
    AhoCorasick::new(patterns).expect("reject patterns are valid")
});

static APPLIED_PATCH: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build([APPLIED_PATCH_PHRASE])
        .expect("applied patch phrase is valid")
});

/// The two harness generations, told apart by their instance identifiers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InstanceFamily {
    /// Identifiers like `django__django-11099`. Transcripts include baseline test output before
    /// the predicted patch is applied.
    Undotted,

    /// Identifiers like `owner__repo.abc123.variant`.
    Dotted,
}

impl InstanceFamily {
    /// Determines the family of an instance identifier.
    pub fn from_instance_id(instance_id: &str) -> Self {
        if instance_id.contains('.') {
            InstanceFamily::Dotted
        } else {
            InstanceFamily::Undotted
        }
    }
}

/// Why a transcript was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GateFailure {
    /// A gating harness marker was present.
    Marker(LogMarker),

    /// The harness could not reset the task environment.
    ResetTaskEnvironment,

    /// An undotted-family transcript never mentions applying a patch.
    MissingApplyMarker,
}

impl fmt::Display for GateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateFailure::Marker(marker) => write!(f, "transcript contains `{marker}`"),
            GateFailure::ResetTaskEnvironment => {
                write!(f, "transcript contains `{RESET_TASK_ENV_FAILED}`")
            }
            GateFailure::MissingApplyMarker => {
                write!(f, "transcript never mentions `{APPLIED_PATCH_PHRASE}`")
            }
        }
    }
}

/// The result of checking a transcript.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GateOutcome<'a> {
    /// The transcript can be parsed. `transcript` has baseline output removed.
    Passed {
        /// The part of the transcript to parse.
        transcript: &'a str,
    },

    /// The transcript must not be graded.
    Rejected {
        /// The reason for rejection.
        reason: GateFailure,

        /// The transcript, unchanged.
        transcript: &'a str,
    },
}

impl<'a> GateOutcome<'a> {
    /// Returns true if the transcript passed.
    pub fn is_ok(&self) -> bool {
        matches!(self, GateOutcome::Passed { .. })
    }

    /// Returns the transcript: trimmed if it passed, unchanged otherwise.
    pub fn transcript(&self) -> &'a str {
        match self {
            GateOutcome::Passed { transcript } | GateOutcome::Rejected { transcript, .. } => {
                transcript
            }
        }
    }

    /// Returns the reason for rejection, if the transcript was rejected.
    pub fn failure(&self) -> Option<GateFailure> {
        match self {
            GateOutcome::Passed { .. } => None,
            GateOutcome::Rejected { reason, .. } => Some(*reason),
        }
    }

    /// Splits the outcome into `(ok, transcript)`.
    pub fn into_parts(self) -> (bool, &'a str) {
        (self.is_ok(), self.transcript())
    }
}

/// Checks a transcript for infrastructure failures.
///
/// For undotted-family instances, a transcript that passes is trimmed to what follows the last
/// [`PRED_PATCH_APPLIED`] marker, so that baseline test output isn't graded.
pub fn check<'a>(transcript: &'a str, instance_id: &str) -> GateOutcome<'a> {
    let family = InstanceFamily::from_instance_id(instance_id);

    if let Some(found) = REJECT_PATTERNS.find(transcript) {
        let reason = LogMarker::GATING
            .get(found.pattern().as_usize())
            .map_or(GateFailure::ResetTaskEnvironment, |&marker| {
                GateFailure::Marker(marker)
            });
        return GateOutcome::Rejected { reason, transcript };
    }

    if family == InstanceFamily::Undotted && !APPLIED_PATCH.is_match(transcript) {
        return GateOutcome::Rejected {
            reason: GateFailure::MissingApplyMarker,
            transcript,
        };
    }

    let trimmed = match family {
        InstanceFamily::Undotted => transcript
            .rsplit_once(PRED_PATCH_APPLIED)
            .map_or(transcript, |(_, after)| after),
        InstanceFamily::Dotted => transcript,
    };
    GateOutcome::Passed {
        transcript: trimmed,
    }
}
