//! Dependency checking for the reconstruction environment.
//!
//! Every package in the required list is probed; the check never
//! short-circuits on the first failure, so a single run reports the full
//! missing set.

use serde::Serialize;

use crate::deps::probe::ImportProbe;
use crate::error::{PlinthError, Result};

/// Probe outcome for a single package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageStatus {
    /// Package name as it appears in the required list.
    pub name: String,

    /// Whether the package resolved in the probed environment.
    pub found: bool,
}

/// Result of probing the full required-package list.
///
/// Entries preserve the input order of the package list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyReport {
    pub packages: Vec<PackageStatus>,
}

impl DependencyReport {
    /// Names of packages that failed to resolve, in input order.
    pub fn missing(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| !p.found)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Whether every required package resolved.
    pub fn all_found(&self) -> bool {
        self.packages.iter().all(|p| p.found)
    }

    /// Number of packages probed.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the report covers no packages at all.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Probe every package in `packages` and report per-package status.
pub fn check_packages(packages: &[String], probe: &dyn ImportProbe) -> DependencyReport {
    let statuses = packages
        .iter()
        .map(|name| {
            let found = probe.is_importable(name);
            tracing::debug!(package = %name, found, "probed package");
            PackageStatus {
                name: name.clone(),
                found,
            }
        })
        .collect();

    DependencyReport { packages: statuses }
}

/// Probe every package and fail when any are missing.
///
/// Returns the full report on success so callers can still display
/// per-package detail.
pub fn ensure_packages(packages: &[String], probe: &dyn ImportProbe) -> Result<DependencyReport> {
    let report = check_packages(packages, probe);
    let missing = report.missing();

    if missing.is_empty() {
        Ok(report)
    } else {
        Err(PlinthError::MissingDependencies {
            packages: missing.into_iter().map(String::from).collect(),
        })
    }
}
