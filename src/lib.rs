// src/lib.rs

//! Licman: license manifest listing and change tracking
//!
//! Reads the license manifest a build system writes for every image and
//! turns it into tabular reports, either a plain listing of one build or
//! a comparison of two builds.
//!
//! # Architecture
//!
//! - `manifest`: stanza parser producing an ordered, name-unique package set
//! - `diff`: classifies packages as added, removed, changed or unchanged
//! - `report`: CSV and JSON rendering plus the text change summary

pub mod diff;
mod error;
pub mod manifest;
pub mod report;

pub use diff::{DiffResult, DiffSummary, diff};
pub use error::{Error, Result};
pub use manifest::{ManifestSet, PackageRecord, ParseOptions, parse};
