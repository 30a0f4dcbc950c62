// src/report/xlsx.rs

//! Excel workbooks for manifest listings and change reports
//!
//! The change workbook colours the cells that moved between builds:
//! yellow for added and removed packages, green for version changes, red
//! for license changes. Every sheet gets an autofilter over the data and
//! column widths sized to the titles.

use super::table::{CHANGES_HEADER, ChangeRow, LIST_HEADER, change_rows, list_cells};
use crate::diff::{ChangedField, DiffResult};
use crate::error::Result;
use crate::manifest::ManifestSet;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use std::io::Write;

/// Name of the data sheet
pub const SHEET_NAME: &str = "sheet1";

/// Change-table columns, as laid out in `CHANGES_HEADER`
const COL_PACKAGE: usize = 0;
const PREVIOUS_COLS: [usize; 4] = [1, 2, 3, 4];
const CURRENT_COLS: [usize; 4] = [5, 6, 7, 8];
const COL_PREV_VERSION: usize = 1;
const COL_PREV_LICENSE: usize = 3;
const COL_PREV_RECIPE_VERSION: usize = 4;
const COL_CURR_VERSION: usize = 5;
const COL_CURR_LICENSE: usize = 7;
const COL_CURR_RECIPE_VERSION: usize = 8;

/// Cell highlight classes in a change workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Package added or removed
    Package,
    /// Version or recipe version changed
    Version,
    /// License changed
    License,
}

impl Highlight {
    pub fn color(&self) -> Color {
        match self {
            Highlight::Package => Color::Yellow,
            Highlight::Version => Color::Green,
            Highlight::License => Color::Red,
        }
    }
}

/// Highlight for every cell of a change row, in `CHANGES_HEADER` order
pub fn row_highlights(row: &ChangeRow<'_>) -> [Option<Highlight>; CHANGES_HEADER.len()] {
    let mut marks = [None; CHANGES_HEADER.len()];

    if row.is_added() || row.is_removed() {
        let side = if row.is_added() {
            CURRENT_COLS
        } else {
            PREVIOUS_COLS
        };
        marks[COL_PACKAGE] = Some(Highlight::Package);
        for col in side {
            marks[col] = Some(Highlight::Package);
        }
        return marks;
    }

    for field in row.fields {
        let (cols, highlight) = match field {
            ChangedField::Version => ([COL_PREV_VERSION, COL_CURR_VERSION], Highlight::Version),
            ChangedField::License => ([COL_PREV_LICENSE, COL_CURR_LICENSE], Highlight::License),
            ChangedField::RecipeVersion => (
                [COL_PREV_RECIPE_VERSION, COL_CURR_RECIPE_VERSION],
                Highlight::Version,
            ),
        };
        for col in cols {
            marks[col] = Some(highlight);
        }
    }

    marks
}

/// Bold titles, widths from the titles, sheet name
fn write_header(sheet: &mut Worksheet, header: &[&str]) -> Result<()> {
    sheet.set_name(SHEET_NAME)?;
    let bold = Format::new().set_bold();

    for (col, title) in header.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &bold)?;
        sheet.set_column_width(col, title.len() as f64 + 5.0)?;
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: usize, value: &str, format: Option<&Format>) -> Result<()> {
    let col = col as u16;
    match (value.is_empty(), format) {
        (true, None) => {}
        (true, Some(format)) => {
            sheet.write_blank(row, col, format)?;
        }
        (false, None) => {
            sheet.write_string(row, col, value)?;
        }
        (false, Some(format)) => {
            sheet.write_string_with_format(row, col, value, format)?;
        }
    }
    Ok(())
}

fn save<W: Write>(workbook: &mut Workbook, mut writer: W) -> Result<()> {
    let buffer = workbook.save_to_buffer()?;
    writer.write_all(&buffer)?;
    Ok(())
}

/// Write one row per package, in manifest order
pub fn write_list_xlsx<W: Write>(set: &ManifestSet, writer: W) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_header(sheet, &LIST_HEADER)?;

    for (idx, rec) in set.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in list_cells(rec).into_iter().enumerate() {
            write_cell(sheet, row, col, value, None)?;
        }
    }
    sheet.autofilter(0, 0, set.len() as u32, (LIST_HEADER.len() - 1) as u16)?;

    save(&mut workbook, writer)
}

/// Write the merged previous/current table with highlighted changes
pub fn write_changes_xlsx<W: Write>(result: &DiffResult, writer: W) -> Result<()> {
    let fills = [Highlight::Package, Highlight::Version, Highlight::License]
        .map(|h| (h, Format::new().set_background_color(h.color())));
    let fill_for = |h: Highlight| fills.iter().find(|(k, _)| *k == h).map(|(_, f)| f);

    let rows = change_rows(result);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_header(sheet, &CHANGES_HEADER)?;

    for (idx, change) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        let marks = row_highlights(change);
        for (col, value) in change.cells().into_iter().enumerate() {
            write_cell(sheet, row, col, value, marks[col].and_then(fill_for))?;
        }
    }
    sheet.autofilter(0, 0, rows.len() as u32, (CHANGES_HEADER.len() - 1) as u16)?;

    save(&mut workbook, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::manifest::parse;

    const PREVIOUS: &str = "busybox\n  VERSION: 1.35.0\n  LICENSE: GPL-2.0-only\ndropbear\n  VERSION: 2022.83\n  LICENSE: MIT\n";
    const CURRENT: &str = "busybox\n  VERSION: 1.36.1\n  LICENSE: GPL-2.0-only & bzip2-1.0.4\nacl\n  VERSION: 2.3.1\n  LICENSE: MIT\n";

    fn marked_cols(marks: &[Option<Highlight>], highlight: Highlight) -> Vec<usize> {
        marks
            .iter()
            .enumerate()
            .filter(|(_, m)| **m == Some(highlight))
            .map(|(col, _)| col)
            .collect()
    }

    #[test]
    fn test_header_columns_match_highlight_layout() {
        assert_eq!(CHANGES_HEADER[COL_PREV_VERSION], "Previous version");
        assert_eq!(CHANGES_HEADER[COL_PREV_LICENSE], "Previous license");
        assert_eq!(CHANGES_HEADER[COL_PREV_RECIPE_VERSION], "Previous recipe version");
        assert_eq!(CHANGES_HEADER[COL_CURR_VERSION], "Current version");
        assert_eq!(CHANGES_HEADER[COL_CURR_LICENSE], "Current license");
        assert_eq!(CHANGES_HEADER[COL_CURR_RECIPE_VERSION], "Current recipe version");
    }

    #[test]
    fn test_highlights_by_change_kind() {
        let result = diff(&parse(PREVIOUS).unwrap(), &parse(CURRENT).unwrap());
        let rows = change_rows(&result);
        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["acl", "busybox", "dropbear"]);

        // Added: package and the current side in yellow
        let added = row_highlights(&rows[0]);
        assert_eq!(marked_cols(&added, Highlight::Package), vec![0, 5, 6, 7, 8]);

        // Changed: version in green, license in red
        let changed = row_highlights(&rows[1]);
        assert_eq!(marked_cols(&changed, Highlight::Version), vec![1, 5]);
        assert_eq!(marked_cols(&changed, Highlight::License), vec![3, 7]);
        assert!(marked_cols(&changed, Highlight::Package).is_empty());

        // Removed: package and the previous side in yellow
        let removed = row_highlights(&rows[2]);
        assert_eq!(marked_cols(&removed, Highlight::Package), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unchanged_row_has_no_highlight() {
        let set = parse(PREVIOUS).unwrap();
        let result = diff(&set, &set);
        for row in change_rows(&result) {
            assert!(row_highlights(&row).iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_highlight_colors() {
        assert_eq!(Highlight::Package.color(), Color::Yellow);
        assert_eq!(Highlight::Version.color(), Color::Green);
        assert_eq!(Highlight::License.color(), Color::Red);
    }

    #[test]
    fn test_workbooks_are_zip_archives() {
        let result = diff(&parse(PREVIOUS).unwrap(), &parse(CURRENT).unwrap());

        let mut changes = Vec::new();
        write_changes_xlsx(&result, &mut changes).unwrap();
        assert!(changes.starts_with(b"PK"));

        let mut list = Vec::new();
        write_list_xlsx(&parse(CURRENT).unwrap(), &mut list).unwrap();
        assert!(list.starts_with(b"PK"));
    }
}
