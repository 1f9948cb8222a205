// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by patchgrade.
//!
//! Grading itself never fails: malformed transcripts degrade to partial status maps and
//! infrastructure failures are reported in the [`EvaluationReport`](patchgrade_metadata::EvaluationReport).
//! The errors here are produced at the input boundaries only.

use crate::parsers::LogDialect;
use camino::Utf8PathBuf;
use config::ConfigError;
use thiserror::Error;

/// An error that occurred while reading the grading config.
#[derive(Debug, Error)]
#[error(
    "failed to read patchgrade config{}",
    .config_file.as_ref().map_or_else(String::new, |file| format!(" at `{file}`"))
)]
#[non_exhaustive]
pub struct ConfigReadError {
    config_file: Option<Utf8PathBuf>,
    #[source]
    kind: ConfigReadErrorKind,
}

impl ConfigReadError {
    pub(crate) fn new(config_file: Option<Utf8PathBuf>, kind: ConfigReadErrorKind) -> Self {
        Self { config_file, kind }
    }

    /// Returns the config file that failed to read, or `None` for the embedded default config.
    pub fn config_file(&self) -> Option<&Utf8PathBuf> {
        self.config_file.as_ref()
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigReadErrorKind {
        &self.kind
    }
}

/// The kind of [`ConfigReadError`] that occurred.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigReadErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),

    /// A dialect name in the config was not recognized.
    #[error("invalid dialect for `{key}`")]
    InvalidDialect {
        /// The config key the dialect was set for.
        key: String,

        /// The underlying error.
        #[source]
        err: UnknownDialectError,
    },
}

/// An error returned while parsing a [`LogDialect`] from a string.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error(
    "unrecognized log dialect: {input}\n(known values: {})",
    LogDialect::variants().join(", "),
)]
pub struct UnknownDialectError {
    input: String,
}

impl UnknownDialectError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that was not recognized.
    pub fn input(&self) -> &str {
        &self.input
    }
}
