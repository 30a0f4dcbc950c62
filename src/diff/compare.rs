// src/diff/compare.rs

//! Field-level record comparison

use crate::manifest::PackageRecord;
use serde::Serialize;

/// Tracked fields whose difference marks a package as changed
///
/// The recipe name is not tracked: a package moving between recipes is not
/// a change from a licensing point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangedField {
    Version,
    License,
    RecipeVersion,
}

impl ChangedField {
    /// Comparison and reporting order
    pub const ALL: [ChangedField; 3] = [
        ChangedField::Version,
        ChangedField::License,
        ChangedField::RecipeVersion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChangedField::Version => "version",
            ChangedField::License => "license",
            ChangedField::RecipeVersion => "recipe version",
        }
    }

    /// The record's value for this field
    pub fn value<'a>(&self, record: &'a PackageRecord) -> &'a str {
        match self {
            ChangedField::Version => &record.version,
            ChangedField::License => &record.license,
            ChangedField::RecipeVersion => &record.recipe_version,
        }
    }
}

/// Compare two records for the same package
///
/// Values are compared with exact string equality; manifests are written by
/// the build tool in canonical form already.
///
/// # Returns
/// The differing fields in [`ChangedField::ALL`] order; empty when the
/// records match.
pub fn compare_records(previous: &PackageRecord, current: &PackageRecord) -> Vec<ChangedField> {
    ChangedField::ALL
        .into_iter()
        .filter(|field| field.value(previous) != field.value(current))
        .collect()
}
