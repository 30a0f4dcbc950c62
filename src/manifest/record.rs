// src/manifest/record.rs

//! Normalized package records and the ordered set built from one manifest

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// One package stanza from a license manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Package name, unique within one manifest
    pub name: String,

    /// Package version as written by the build tool
    pub version: String,

    /// License expression, stored verbatim (e.g. "GPL-2.0-only & MIT")
    pub license: String,

    /// Name of the recipe that produced the package
    #[serde(default)]
    pub recipe_name: String,

    /// Version of the recipe that produced the package
    #[serde(default)]
    pub recipe_version: String,
}

impl PackageRecord {
    /// Create a record with only a name; every other field is empty
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Counters collected while reading a manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Number of lines in the source text
    pub lines: usize,
    /// Number of stanzas read, duplicates included
    pub packages: usize,
}

/// Ordered, name-unique collection of package records
///
/// Records keep the position of the first stanza that introduced their
/// name. A later stanza with the same name replaces the record in place and
/// the name is remembered in `duplicates`.
#[derive(Debug, Clone, Default)]
pub struct ManifestSet {
    records: Vec<PackageRecord>,
    index: HashMap<String, usize>,
    duplicates: Vec<String>,
    stats: ParseStats,
}

impl ManifestSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any earlier record with the same name
    ///
    /// Returns the replaced record, if there was one.
    pub(crate) fn insert(&mut self, record: PackageRecord) -> Option<PackageRecord> {
        self.stats.packages += 1;

        if let Some(&pos) = self.index.get(&record.name) {
            warn!(
                "Duplicate stanza for package '{}', keeping the later one",
                record.name
            );
            if !self.duplicates.contains(&record.name) {
                self.duplicates.push(record.name.clone());
            }
            return Some(std::mem::replace(&mut self.records[pos], record));
        }

        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        None
    }

    pub(crate) fn set_line_count(&mut self, lines: usize) {
        self.stats.lines = lines;
    }

    /// Number of distinct packages
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, PackageRecord> {
        self.records.iter()
    }

    /// All records in first-seen order
    pub fn records(&self) -> &[PackageRecord] {
        &self.records
    }

    /// Look up a record by package name
    pub fn get(&self, name: &str) -> Option<&PackageRecord> {
        self.index.get(name).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Package names in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Names that appeared in more than one stanza
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a ManifestSet {
    type Item = &'a PackageRecord;
    type IntoIter = std::slice::Iter<'a, PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, version: &str) -> PackageRecord {
        PackageRecord {
            version: version.to_string(),
            ..PackageRecord::new(name)
        }
    }

    #[test]
    fn test_new_record_defaults_to_empty_strings() {
        let rec = PackageRecord::new("busybox");
        assert_eq!(rec.name, "busybox");
        assert_eq!(rec.version, "");
        assert_eq!(rec.license, "");
        assert_eq!(rec.recipe_name, "");
        assert_eq!(rec.recipe_version, "");
    }

    #[test]
    fn test_insert_preserves_first_seen_order() {
        let mut set = ManifestSet::new();
        set.insert(record("zlib", "1.3"));
        set.insert(record("acl", "2.3.1"));
        set.insert(record("busybox", "1.36.1"));

        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["zlib", "acl", "busybox"]);
        assert_eq!(set.len(), 3);
        assert!(set.duplicates().is_empty());
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let mut set = ManifestSet::new();
        set.insert(record("zlib", "1.2"));
        set.insert(record("acl", "2.3.1"));
        let replaced = set.insert(record("zlib", "1.3"));

        assert_eq!(replaced.unwrap().version, "1.2");
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].version, "1.3");
        assert_eq!(set.get("zlib").unwrap().version, "1.3");
        assert_eq!(set.duplicates(), &["zlib".to_string()]);
        assert_eq!(set.stats().packages, 3);
    }

    #[test]
    fn test_lookup_missing_name() {
        let set = ManifestSet::new();
        assert!(set.get("nope").is_none());
        assert!(!set.contains("nope"));
        assert!(set.is_empty());
    }
}
