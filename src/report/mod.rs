// src/report/mod.rs

//! Report rendering
//!
//! Writes parsed manifests and diff results as CSV tables, Excel
//! workbooks or JSON documents, and formats the plain-text change summary printed after a
//! comparison.

pub mod json;
pub mod table;
pub mod xlsx;

pub use json::{write_changes_json, write_list_json};
pub use table::{ChangeRow, change_rows, write_changes_csv, write_list_csv};
pub use xlsx::{write_changes_xlsx, write_list_xlsx};

use crate::diff::{DiffResult, DiffSummary};
use crate::error::{Error, Result};
use crate::manifest::ManifestSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Output file formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        }
    }
}

/// Destination of a report: `<base>.<extension>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
    format: OutputFormat,
}

impl OutputTarget {
    /// Resolve the output path for a name base
    ///
    /// The extension is appended, so `changes-v82-v83` becomes
    /// `changes-v82-v83.csv` rather than having `.v83` replaced.
    pub fn new(base: impl AsRef<Path>, format: OutputFormat) -> Self {
        let mut name = OsString::from(base.as_ref().as_os_str());
        name.push(".");
        name.push(format.extension());

        Self {
            path: PathBuf::from(name),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Fail early when the file exists and `force` is not set
    pub fn check_writable(&self, force: bool) -> Result<()> {
        if !force && self.path.exists() {
            return Err(Error::OutputExists(self.path.clone()));
        }
        Ok(())
    }

    /// Open the output file for writing
    ///
    /// Fails with [`Error::OutputExists`] when the file is already there and
    /// `force` is not set.
    pub fn create(&self, force: bool) -> Result<BufWriter<File>> {
        self.check_writable(force)?;
        if self.path.exists() {
            warn!("Output file {} already exists, overwriting", self.path.display());
        }

        let file = File::create(&self.path)?;
        Ok(BufWriter::new(file))
    }

    /// Render a single manifest listing to this target
    pub fn write_list(&self, set: &ManifestSet, force: bool) -> Result<()> {
        info!("Exporting {:?}: {}", self.format, self.path.display());
        let mut out = self.create(force)?;
        match self.format {
            OutputFormat::Csv => write_list_csv(set, &mut out)?,
            OutputFormat::Xlsx => write_list_xlsx(set, &mut out)?,
            OutputFormat::Json => write_list_json(set, &mut out)?,
        }
        out.flush()?;
        Ok(())
    }

    /// Render a comparison to this target
    pub fn write_changes(&self, result: &DiffResult, force: bool) -> Result<()> {
        info!("Exporting {:?}: {}", self.format, self.path.display());
        let mut out = self.create(force)?;
        match self.format {
            OutputFormat::Csv => write_changes_csv(result, &mut out)?,
            OutputFormat::Xlsx => write_changes_xlsx(result, &mut out)?,
            OutputFormat::Json => write_changes_json(result, &mut out)?,
        }
        out.flush()?;
        Ok(())
    }
}

/// Plain-text change summary
pub fn summary_text(summary: &DiffSummary) -> String {
    let lines = [
        ("Total changes", summary.total_changes()),
        ("Package changes", summary.package_changes()),
        ("- Added", summary.added),
        ("- Removed", summary.removed),
        ("License changes", summary.license_changes),
        ("Version changes", summary.version_changes),
        ("Recipe version changes", summary.recipe_version_changes),
    ];

    lines
        .iter()
        .map(|(label, count)| format!("{:<23}: {}\n", label, count))
        .collect()
}
