// src/diff/engine.rs

//! Diff engine over two parsed manifests

use super::{DiffResult, PackageChange, compare_records};
use crate::manifest::ManifestSet;
use tracing::debug;

/// Classify every package of two manifests
///
/// Added packages come out in `current` order; removed, changed and
/// unchanged packages in `previous` order. Comparing a set with itself yields
/// only unchanged packages.
///
/// # Example
/// ```
/// use licman::diff::diff;
/// use licman::manifest::parse;
///
/// let previous = parse("acl\n  VERSION: 2.3.1\n").unwrap();
/// let current = parse("acl\n  VERSION: 2.3.2\nzlib\n  VERSION: 1.3\n").unwrap();
///
/// let result = diff(&previous, &current);
/// assert_eq!(result.added[0].name, "zlib");
/// assert_eq!(result.changed[0].describe(), vec!["version: 2.3.1 -> 2.3.2"]);
/// ```
pub fn diff(previous: &ManifestSet, current: &ManifestSet) -> DiffResult {
    let mut result = DiffResult::default();

    for prev in previous {
        match current.get(&prev.name) {
            None => result.removed.push(prev.clone()),
            Some(curr) => {
                let fields = compare_records(prev, curr);
                if fields.is_empty() {
                    result.unchanged.push(prev.clone());
                } else {
                    result.changed.push(PackageChange {
                        previous: prev.clone(),
                        current: curr.clone(),
                        fields,
                    });
                }
            }
        }
    }

    result.added = current
        .iter()
        .filter(|curr| !previous.contains(&curr.name))
        .cloned()
        .collect();

    debug!(
        "Diff: {} added, {} removed, {} changed, {} unchanged",
        result.added.len(),
        result.removed.len(),
        result.changed.len(),
        result.unchanged.len()
    );

    result
}
