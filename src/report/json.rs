// src/report/json.rs

//! JSON documents for manifest listings and change reports

use crate::diff::{DiffResult, DiffSummary};
use crate::error::Result;
use crate::manifest::{ManifestSet, PackageRecord, ParseStats};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ListDocument<'a> {
    stats: ParseStats,
    duplicates: &'a [String],
    packages: &'a [PackageRecord],
}

#[derive(Serialize)]
struct ChangesDocument<'a> {
    summary: DiffSummary,
    #[serde(flatten)]
    result: &'a DiffResult,
}

/// Write a manifest listing as pretty-printed JSON
pub fn write_list_json<W: Write>(set: &ManifestSet, writer: W) -> Result<()> {
    let doc = ListDocument {
        stats: set.stats(),
        duplicates: set.duplicates(),
        packages: set.records(),
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

/// Write a diff result and its summary as pretty-printed JSON
pub fn write_changes_json<W: Write>(result: &DiffResult, writer: W) -> Result<()> {
    let doc = ChangesDocument {
        summary: result.summary(),
        result,
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::manifest::parse;
    use serde_json::Value;

    #[test]
    fn test_list_json() {
        let set = parse("acl\n  VERSION: 2.3.1\nacl\n  VERSION: 2.3.2\nzlib\n").unwrap();
        let mut buf = Vec::new();
        write_list_json(&set, &mut buf).unwrap();

        let doc: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["stats"]["packages"], 3);
        assert_eq!(doc["duplicates"][0], "acl");
        assert_eq!(doc["packages"][0]["version"], "2.3.2");
        assert_eq!(doc["packages"][1]["name"], "zlib");
        assert_eq!(doc["packages"][1]["recipe_version"], "");
    }

    #[test]
    fn test_changes_json() {
        let previous = parse("acl\n  VERSION: 2.3.1\n  LICENSE: MIT\n").unwrap();
        let current = parse("acl\n  VERSION: 2.3.1\n  LICENSE: BSD-2-Clause\nzlib\n").unwrap();
        let result = diff(&previous, &current);

        let mut buf = Vec::new();
        write_changes_json(&result, &mut buf).unwrap();

        let doc: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["summary"]["added"], 1);
        assert_eq!(doc["summary"]["license_changes"], 1);
        assert_eq!(doc["added"][0]["name"], "zlib");
        assert_eq!(doc["changed"][0]["fields"][0], "license");
        assert_eq!(doc["changed"][0]["previous"]["license"], "MIT");
        assert!(doc["removed"].as_array().unwrap().is_empty());
    }
}
