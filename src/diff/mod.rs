// src/diff/mod.rs

//! Manifest comparison
//!
//! Reconciles the package sets of two builds, keyed by package name, and
//! classifies every package as added, removed, changed or unchanged.

pub mod compare;
pub mod engine;

pub use compare::{ChangedField, compare_records};
pub use engine::diff;

use crate::manifest::PackageRecord;
use serde::Serialize;

/// A package present in both manifests whose tracked fields differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageChange {
    pub previous: PackageRecord,
    pub current: PackageRecord,
    /// Differing fields, in the order version, license, recipe version
    pub fields: Vec<ChangedField>,
}

impl PackageChange {
    pub fn name(&self) -> &str {
        &self.current.name
    }

    pub fn has(&self, field: ChangedField) -> bool {
        self.fields.contains(&field)
    }

    /// Human-readable delta, one entry per changed field
    ///
    /// e.g. `["version: 1.2 -> 1.3"]`
    pub fn describe(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| {
                format!(
                    "{}: {} -> {}",
                    field.name(),
                    field.value(&self.previous),
                    field.value(&self.current)
                )
            })
            .collect()
    }
}

/// Classification of two manifests' package sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// Only in the current manifest, current order
    pub added: Vec<PackageRecord>,
    /// Only in the previous manifest, previous order
    pub removed: Vec<PackageRecord>,
    /// In both, with at least one tracked field differing
    pub changed: Vec<PackageChange>,
    /// In both and identical on every tracked field
    pub unchanged: Vec<PackageRecord>,
}

impl DiffResult {
    /// True when nothing was added, removed or changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn summary(&self) -> DiffSummary {
        let count = |field| self.changed.iter().filter(|c| c.has(field)).count();

        DiffSummary {
            added: self.added.len(),
            removed: self.removed.len(),
            changed: self.changed.len(),
            version_changes: count(ChangedField::Version),
            license_changes: count(ChangedField::License),
            recipe_version_changes: count(ChangedField::RecipeVersion),
            unchanged: self.unchanged.len(),
        }
    }
}

/// Counts derived from a [`DiffResult`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    /// Packages with at least one changed field
    pub changed: usize,
    pub version_changes: usize,
    pub license_changes: usize,
    pub recipe_version_changes: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn package_changes(&self) -> usize {
        self.added + self.removed
    }

    /// Package changes plus every field change
    ///
    /// A package whose version and license both changed counts twice.
    pub fn total_changes(&self) -> usize {
        self.package_changes()
            + self.version_changes
            + self.license_changes
            + self.recipe_version_changes
    }
}
