// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod config_file;
mod fixtures;
mod grading;
