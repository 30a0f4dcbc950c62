// src/report/table.rs

//! CSV tables for manifest listings and change reports

use crate::diff::{ChangedField, DiffResult};
use crate::error::Result;
use crate::manifest::{ManifestSet, PackageRecord};
use std::io::Write;

/// Marker written into change columns
const MARK: &str = "y";

pub(crate) const LIST_HEADER: [&str; 5] = ["Package", "version", "recipe", "license", "recipe version"];

pub(crate) const CHANGES_HEADER: [&str; 15] = [
    "Package",
    "Previous version",
    "Previous recipe",
    "Previous license",
    "Previous recipe version",
    "Current version",
    "Current recipe",
    "Current license",
    "Current recipe version",
    "Change",
    "Version change",
    "License change",
    "Recipe version change",
    "Package added",
    "Package removed",
];

/// Write one row per package, in manifest order
pub fn write_list_csv<W: Write>(set: &ManifestSet, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(LIST_HEADER)?;

    for rec in set {
        wtr.write_record(list_cells(rec))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Cells of one listing row, in `LIST_HEADER` order
pub(crate) fn list_cells(rec: &PackageRecord) -> [&str; 5] {
    [
        rec.name.as_str(),
        rec.version.as_str(),
        rec.recipe_name.as_str(),
        rec.license.as_str(),
        rec.recipe_version.as_str(),
    ]
}

/// One package as it appears in the change table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRow<'a> {
    pub name: &'a str,
    pub previous: Option<&'a PackageRecord>,
    pub current: Option<&'a PackageRecord>,
    pub fields: &'a [ChangedField],
}

impl ChangeRow<'_> {
    pub fn is_added(&self) -> bool {
        self.previous.is_none()
    }

    pub fn is_removed(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_change(&self) -> bool {
        self.is_added() || self.is_removed() || !self.fields.is_empty()
    }

    /// Cells in `CHANGES_HEADER` order
    pub(crate) fn cells(&self) -> Vec<&str> {
        let mark = |set: bool| if set { MARK } else { "" };

        let mut cells = vec![self.name];
        cells.extend(side_cells(self.previous));
        cells.extend(side_cells(self.current));
        cells.extend([
            mark(self.is_change()),
            mark(self.fields.contains(&ChangedField::Version)),
            mark(self.fields.contains(&ChangedField::License)),
            mark(self.fields.contains(&ChangedField::RecipeVersion)),
            mark(self.is_added()),
            mark(self.is_removed()),
        ]);
        cells
    }
}

/// Version, recipe, license and recipe version of one side; empty when absent
fn side_cells(rec: Option<&PackageRecord>) -> [&str; 4] {
    match rec {
        Some(r) => [
            r.version.as_str(),
            r.recipe_name.as_str(),
            r.license.as_str(),
            r.recipe_version.as_str(),
        ],
        None => [""; 4],
    }
}

/// Merge a diff result into one row per package, sorted by name
pub fn change_rows(result: &DiffResult) -> Vec<ChangeRow<'_>> {
    let mut rows: Vec<ChangeRow<'_>> = Vec::with_capacity(
        result.added.len() + result.removed.len() + result.changed.len() + result.unchanged.len(),
    );

    rows.extend(result.added.iter().map(|rec| ChangeRow {
        name: &rec.name,
        previous: None,
        current: Some(rec),
        fields: &[],
    }));
    rows.extend(result.removed.iter().map(|rec| ChangeRow {
        name: &rec.name,
        previous: Some(rec),
        current: None,
        fields: &[],
    }));
    rows.extend(result.changed.iter().map(|change| ChangeRow {
        name: change.name(),
        previous: Some(&change.previous),
        current: Some(&change.current),
        fields: &change.fields,
    }));
    rows.extend(result.unchanged.iter().map(|rec| ChangeRow {
        name: &rec.name,
        previous: Some(rec),
        current: Some(rec),
        fields: &[],
    }));

    rows.sort_by(|a, b| a.name.cmp(b.name));
    rows
}

/// Write the merged previous/current table with change markers
pub fn write_changes_csv<W: Write>(result: &DiffResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CHANGES_HEADER)?;

    for row in change_rows(result) {
        wtr.write_record(row.cells())?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::manifest::parse;

    const PREVIOUS: &str = "\
PACKAGE NAME: busybox
PACKAGE VERSION: 1.35.0
RECIPE NAME: busybox
LICENSE: GPL-2.0-only

PACKAGE NAME: dropbear
PACKAGE VERSION: 2022.83
RECIPE NAME: dropbear
LICENSE: MIT

PACKAGE NAME: zlib
PACKAGE VERSION: 1.3
RECIPE NAME: zlib
LICENSE: Zlib
";

    const CURRENT: &str = "\
PACKAGE NAME: busybox
PACKAGE VERSION: 1.36.1
RECIPE NAME: busybox
LICENSE: GPL-2.0-only & bzip2-1.0.4

PACKAGE NAME: zlib
PACKAGE VERSION: 1.3
RECIPE NAME: zlib
LICENSE: Zlib

PACKAGE NAME: acl
PACKAGE VERSION: 2.3.1
RECIPE NAME: acl
LICENSE: GPL-2.0-or-later, LGPL-2.1-or-later
";

    fn render_changes() -> String {
        let result = diff(&parse(PREVIOUS).unwrap(), &parse(CURRENT).unwrap());
        let mut buf = Vec::new();
        write_changes_csv(&result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_csv() {
        let set = parse(CURRENT).unwrap();
        let mut buf = Vec::new();
        write_list_csv(&set, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Package,version,recipe,license,recipe version");
        assert_eq!(lines[1], "busybox,1.36.1,busybox,GPL-2.0-only & bzip2-1.0.4,");
        assert_eq!(lines[2], "zlib,1.3,zlib,Zlib,");
        assert_eq!(lines[3], "acl,2.3.1,acl,\"GPL-2.0-or-later, LGPL-2.1-or-later\",");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_change_rows_sorted_by_name() {
        let result = diff(&parse(PREVIOUS).unwrap(), &parse(CURRENT).unwrap());
        let rows = change_rows(&result);

        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["acl", "busybox", "dropbear", "zlib"]);
        assert!(rows[0].is_added());
        assert!(rows[2].is_removed());
        assert!(!rows[3].is_change());
    }

    #[test]
    fn test_changes_csv_markers() {
        let text = render_changes();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CHANGES_HEADER.join(","));
        assert_eq!(
            lines[1],
            "acl,,,,,2.3.1,acl,\"GPL-2.0-or-later, LGPL-2.1-or-later\",,y,,,,y,"
        );
        assert_eq!(
            lines[2],
            "busybox,1.35.0,busybox,GPL-2.0-only,,1.36.1,busybox,GPL-2.0-only & bzip2-1.0.4,,y,y,y,,,"
        );
        assert_eq!(lines[3], "dropbear,2022.83,dropbear,MIT,,,,,,y,,,,,y");
        assert_eq!(lines[4], "zlib,1.3,zlib,Zlib,,1.3,zlib,Zlib,,,,,,,");
        assert_eq!(lines.len(), 5);
    }
}
