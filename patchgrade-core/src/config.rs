// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for patchgrade.

use crate::{
    errors::{ConfigReadError, ConfigReadErrorKind},
    parsers::LogDialect,
    registry::DialectRegistry,
    report::GradeOptions,
    resolution::ResolutionMode,
};
use camino::Utf8Path;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Grading configuration after layering a config file on top of the defaults.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GradingConfig {
    default_dialect: LogDialect,
    dialects: BTreeMap<String, LogDialect>,
    calculate_to_fail: bool,
    include_raw_log: bool,
    include_tests_status: bool,
}

impl GradingConfig {
    /// Contains the default config as a TOML file.
    ///
    /// Config files passed to [`Self::from_sources`] are layered on top of it.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the config from the given file, layered on top of the default config. If no file is
    /// given, only the default config is used.
    pub fn from_sources(config_file: Option<&Utf8Path>) -> Result<Self, ConfigReadError> {
        let mut builder = Self::make_default_config();
        if let Some(config_file) = config_file {
            debug!("grading config: loading from {config_file}");
            builder = builder.add_source(File::new(config_file.as_str(), FileFormat::Toml));
        }

        let config_file = config_file.map(ToOwned::to_owned);
        let (deserialized, ignored) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigReadError::new(config_file.clone(), kind))?;

        if !ignored.is_empty() {
            warn!(
                "ignoring unknown configuration keys in {}: {}",
                config_file.as_deref().map_or("default config", |file| file.as_str()),
                ignored.into_iter().collect::<Vec<_>>().join(", "),
            );
        }

        deserialized
            .compile()
            .map_err(|kind| ConfigReadError::new(config_file, kind))
    }

    /// Returns the dialect used for projects that aren't registered.
    pub fn default_dialect(&self) -> LogDialect {
        self.default_dialect
    }

    /// Returns the dialect entries configured on top of the built-in registry.
    pub fn dialects(&self) -> &BTreeMap<String, LogDialect> {
        &self.dialects
    }

    /// Builds the dialect registry described by this config.
    pub fn registry(&self) -> DialectRegistry {
        DialectRegistry::with_overrides(
            self.dialects
                .iter()
                .map(|(project, dialect)| (project.clone(), *dialect)),
            self.default_dialect,
        )
    }

    /// Returns grading options for the given resolution mode, with the configured defaults.
    pub fn grade_options(&self, mode: ResolutionMode) -> GradeOptions {
        GradeOptions::new(mode)
            .with_calculate_to_fail(self.calculate_to_fail)
            .with_include_raw_log(self.include_raw_log)
            .with_include_tests_status(self.include_tests_status)
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(GradingConfigDeserialize, BTreeSet<String>), ConfigReadErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigReadErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: GradingConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                // The config crate also reports the key; drop it so the path isn't repeated.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigReadErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self::from_sources(None).expect("default config should be valid")
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct GradingConfigDeserialize {
    default_dialect: String,
    #[serde(default)]
    dialects: BTreeMap<String, String>,
    grading: GradingDefaultsDeserialize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct GradingDefaultsDeserialize {
    calculate_to_fail: bool,
    include_raw_log: bool,
    include_tests_status: bool,
}

impl GradingConfigDeserialize {
    fn compile(self) -> Result<GradingConfig, ConfigReadErrorKind> {
        let default_dialect = parse_dialect("default-dialect", &self.default_dialect)?;
        let dialects = self
            .dialects
            .into_iter()
            .map(|(project, dialect)| {
                let dialect = parse_dialect(&format!("dialects.{project}"), &dialect)?;
                Ok((project, dialect))
            })
            .collect::<Result<_, _>>()?;

        Ok(GradingConfig {
            default_dialect,
            dialects,
            calculate_to_fail: self.grading.calculate_to_fail,
            include_raw_log: self.grading.include_raw_log,
            include_tests_status: self.grading.include_tests_status,
        })
    }
}

fn parse_dialect(key: &str, name: &str) -> Result<LogDialect, ConfigReadErrorKind> {
    name.parse()
        .map_err(|err| ConfigReadErrorKind::InvalidDialect {
            key: key.to_owned(),
            err,
        })
}
