// Copyright (c) The patchgrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selecting a log dialect for an instance.
//!
//! Instances are mapped to a project identity (`owner/repo`), which is then looked up in a
//! registry of known projects. Projects that aren't registered use a default dialect.
//!
//! Dotted-family instances always use the default dialect: their gold test lists were produced
//! with it, whatever project they come from.

use crate::{gate::InstanceFamily, parsers::LogDialect};
use std::{collections::HashMap, sync::LazyLock};
use tracing::debug;

/// Dialects for the projects that the evaluation datasets are drawn from.
const BUILTIN_DIALECTS: &[(&str, LogDialect)] = &[
    ("astropy/astropy", LogDialect::PytestAnsi),
    ("bokeh/bokeh", LogDialect::Pytest),
    ("conan-io/conan", LogDialect::Pytest),
    ("dask/dask", LogDialect::Pytest),
    ("dbt-labs/dbt-core", LogDialect::Pytest),
    ("django/django", LogDialect::UnitTest),
    ("facebookresearch/hydra", LogDialect::Pytest),
    ("getmoto/moto", LogDialect::Pytest),
    ("iterative/dvc", LogDialect::Pytest),
    ("marshmallow-code/marshmallow", LogDialect::Pytest),
    ("matplotlib/matplotlib", LogDialect::Matplotlib),
    ("modin-project/modin", LogDialect::Pytest),
    ("mwaskom/seaborn", LogDialect::Seaborn),
    ("pallets/flask", LogDialect::Pytest),
    ("pandas-dev/pandas", LogDialect::Pytest),
    ("Project-MONAI/MONAI", LogDialect::Pytest),
    ("psf/requests", LogDialect::PytestOptions),
    ("pvlib/pvlib-python", LogDialect::Pytest),
    ("pydantic/pydantic", LogDialect::Pytest),
    ("pydata/xarray", LogDialect::Pytest),
    ("pydicom/pydicom", LogDialect::PytestOptions),
    ("pylint-dev/astroid", LogDialect::Pytest),
    ("pylint-dev/pylint", LogDialect::PytestOptions),
    ("pytest-dev/pytest", LogDialect::Pytest),
    ("python/mypy", LogDialect::BracketTag),
    ("pyvista/pyvista", LogDialect::Pytest),
    ("scikit-learn/scikit-learn", LogDialect::Pytest),
    ("sphinx-doc/sphinx", LogDialect::PytestAnsi),
    ("sqlfluff/sqlfluff", LogDialect::Pytest),
    ("swe-bench/humaneval", LogDialect::Pytest),
    ("sympy/sympy", LogDialect::Sympy),
];

static BUILTIN: LazyLock<DialectRegistry> = LazyLock::new(|| DialectRegistry {
    dialects: BUILTIN_DIALECTS
        .iter()
        .map(|&(project, dialect)| (project.to_owned(), dialect))
        .collect(),
    default_dialect: LogDialect::FALLBACK,
});

/// Derives the project identity (`owner/repo`) from an instance identifier.
///
/// * `scikit-learn__scikit-learn-12421` → `scikit-learn/scikit-learn`: the trailing
///   `-<number>` is dropped.
/// * `pandas-dev__pandas.95b0fa2b.func_pm_op_swap` → `pandas-dev/pandas`: everything from the
///   first `.` on is dropped.
pub fn project_identity(instance_id: &str) -> String {
    let prefix = match instance_id.split_once('.') {
        Some((prefix, _)) => prefix,
        None => instance_id
            .rsplit_once('-')
            .map_or(instance_id, |(prefix, _)| prefix),
    };
    prefix.replace("__", "/")
}

/// A map from project identity to log dialect, with a default for unregistered projects.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DialectRegistry {
    dialects: HashMap<String, LogDialect>,
    default_dialect: LogDialect,
}

impl DialectRegistry {
    /// Returns the built-in registry.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Returns a copy of the built-in registry with extra entries and a different default.
    ///
    /// Entries in `overrides` replace built-in entries for the same project.
    pub fn with_overrides<I, S>(overrides: I, default_dialect: LogDialect) -> Self
    where
        I: IntoIterator<Item = (S, LogDialect)>,
        S: Into<String>,
    {
        let mut dialects = BUILTIN.dialects.clone();
        dialects.extend(
            overrides
                .into_iter()
                .map(|(project, dialect)| (project.into(), dialect)),
        );
        Self {
            dialects,
            default_dialect,
        }
    }

    /// Returns the dialect registered for a project identity, if any.
    pub fn get(&self, project: &str) -> Option<LogDialect> {
        self.dialects.get(project).copied()
    }

    /// Returns the dialect used for unregistered projects.
    pub fn default_dialect(&self) -> LogDialect {
        self.default_dialect
    }

    /// Selects the dialect for an instance.
    ///
    /// Registered projects only apply to undotted instance identifiers. Dotted identifiers get
    /// the default dialect.
    pub fn select(&self, instance_id: &str) -> LogDialect {
        if InstanceFamily::from_instance_id(instance_id) == InstanceFamily::Dotted {
            debug!(
                "instance {instance_id}: dotted identifier, using default dialect {}",
                self.default_dialect,
            );
            return self.default_dialect;
        }

        let project = project_identity(instance_id);
        match self.get(&project) {
            Some(dialect) => {
                debug!("instance {instance_id}: project {project} uses dialect {dialect}");
                dialect
            }
            None => {
                debug!(
                    "instance {instance_id}: project {project} not registered, \
                     using default dialect {}",
                    self.default_dialect,
                );
                self.default_dialect
            }
        }
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
