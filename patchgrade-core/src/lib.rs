// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Grading for patch-evaluation transcripts.
//!
//! Given the captured output of a test run against a predicted patch, patchgrade decides whether
//! the run can be trusted at all ([`gate`]), extracts per-test statuses with the log dialect of
//! the instance's project ([`parsers`], [`registry`]), sorts the gold test lists into success and
//! failure buckets ([`classify`]), and turns those into a verdict ([`resolution`]).
//! [`report::Grader`] ties the steps together.
//!
//! The data model lives in `patchgrade-metadata`.

pub mod classify;
pub mod config;
pub mod errors;
pub mod gate;
pub mod parsers;
pub mod registry;
pub mod report;
pub mod resolution;
