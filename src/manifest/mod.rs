// src/manifest/mod.rs

//! License manifest reading
//!
//! Turns the flat text report a build system writes for an image into an
//! ordered, name-unique [`ManifestSet`].

pub mod parser;
pub mod record;

pub use parser::{ManifestField, ParseOptions, parse, parse_with};
pub use record::{ManifestSet, PackageRecord, ParseStats};

use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

/// Read and parse a manifest file
///
/// Unlike [`parse`], a manifest file that lists no packages is rejected:
/// a license report for a build always names at least one package.
pub fn read_manifest_file(path: impl AsRef<Path>, options: ParseOptions) -> Result<ManifestSet> {
    let path = path.as_ref();
    info!("Reading manifest: {}", path.display());

    let text = std::fs::read_to_string(path)?;
    let set = parse_with(&text, options)?;

    if set.is_empty() {
        return Err(Error::EmptyManifest(path.display().to_string()));
    }

    Ok(set)
}
