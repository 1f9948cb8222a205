// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! The data model shared by patchgrade's log parsers and graders.
//!
//! This crate holds the vocabulary (test statuses, harness marker lines, verdicts), the gold data
//! supplied per instance, and the report format produced by grading. Everything here is a plain
//! value type; the grading pipeline itself lives in `patchgrade-core`.

mod errors;
mod gold;
pub mod markers;
mod report;
mod status;
mod status_map;

pub use errors::*;
pub use gold::*;
pub use markers::LogMarker;
pub use report::*;
pub use status::*;
pub use status_map::*;
