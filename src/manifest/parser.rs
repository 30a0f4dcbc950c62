// src/manifest/parser.rs

//! License manifest parser
//!
//! Reads the stanza layout written by the Yocto `license.manifest`
//! generator:
//!
//! ```text
//! PACKAGE NAME: busybox
//! PACKAGE VERSION: 1.36.1
//! RECIPE NAME: busybox
//! LICENSE: GPL-2.0-only & bzip2-1.0.4
//! ```
//!
//! The indented spelling of the same data (a bare package name followed by
//! indented `KEY: VALUE` lines) is accepted too.

use super::record::{ManifestSet, PackageRecord};
use crate::error::{Error, Result};
use tracing::{debug, trace};

/// Key that opens a stanza in the flat layout
const PACKAGE_NAME_KEY: &str = "PACKAGE NAME";

/// Fields the parser consumes; every other key is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestField {
    Version,
    License,
    RecipeName,
    RecipeVersion,
}

impl ManifestField {
    /// Fields every stanza must carry in strict mode
    pub const REQUIRED: [ManifestField; 3] = [
        ManifestField::Version,
        ManifestField::RecipeName,
        ManifestField::License,
    ];

    /// Match a normalized (trimmed, uppercased) key against the allow-list
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "PACKAGE VERSION" | "VERSION" => Some(ManifestField::Version),
            "LICENSE" => Some(ManifestField::License),
            "RECIPE NAME" => Some(ManifestField::RecipeName),
            "RECIPE VERSION" => Some(ManifestField::RecipeVersion),
            _ => None,
        }
    }

    /// Key as written in the flat layout
    pub fn key(&self) -> &'static str {
        match self {
            ManifestField::Version => "PACKAGE VERSION",
            ManifestField::License => "LICENSE",
            ManifestField::RecipeName => "RECIPE NAME",
            ManifestField::RecipeVersion => "RECIPE VERSION",
        }
    }

    fn assign(&self, record: &mut PackageRecord, value: &str) {
        let slot = match self {
            ManifestField::Version => &mut record.version,
            ManifestField::License => &mut record.license,
            ManifestField::RecipeName => &mut record.recipe_name,
            ManifestField::RecipeVersion => &mut record.recipe_version,
        };
        *slot = value.to_string();
    }
}

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Require every stanza to carry version, recipe name and license
    pub strict: bool,
}

/// Parse manifest text with default (lenient) options
pub fn parse(text: &str) -> Result<ManifestSet> {
    parse_with(text, ParseOptions::default())
}

/// Parse manifest text into an ordered, name-unique set
pub fn parse_with(text: &str, options: ParseOptions) -> Result<ManifestSet> {
    let mut set = ManifestSet::new();
    let mut pending: Option<Stanza> = None;
    // Set once a `PACKAGE NAME:` header is seen; bare name lines are then invalid
    let mut flat_layout = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;

        match classify(raw, line_no)? {
            Line::Blank => {}
            Line::Header { name, flat } => {
                if flat {
                    flat_layout = true;
                } else if flat_layout {
                    return Err(Error::malformed(
                        line_no,
                        format!("unexpected line '{}' between package stanzas", name),
                    ));
                }
                if let Some(stanza) = pending.take() {
                    stanza.flush(&mut set, options)?;
                }
                trace!("Stanza '{}' starts at line {}", name, line_no);
                pending = Some(Stanza::new(name, line_no));
            }
            Line::Field { key, value } => {
                let stanza = pending.as_mut().ok_or_else(|| {
                    Error::malformed(
                        line_no,
                        format!("field line before any package name: '{}'", raw.trim()),
                    )
                })?;

                match ManifestField::from_key(&key) {
                    Some(field) => stanza.set(field, value),
                    None => trace!("Ignoring unrecognized key '{}' at line {}", key, line_no),
                }
            }
        }
    }

    if let Some(stanza) = pending.take() {
        stanza.flush(&mut set, options)?;
    }

    // Counted like `split('\n')`, so a trailing newline adds a final empty line
    set.set_line_count(text.split('\n').count());
    debug!(
        "Parsed {} packages ({} stanzas, {} duplicate names)",
        set.len(),
        set.stats().packages,
        set.duplicates().len()
    );

    Ok(set)
}

/// Shape of a single manifest line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    /// `flat` is set for `PACKAGE NAME:` headers, clear for bare name lines
    Header { name: &'a str, flat: bool },
    Field { key: String, value: &'a str },
}

fn classify(raw: &str, line_no: usize) -> Result<Line<'_>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }

    let indented = raw.starts_with([' ', '\t']);

    match trimmed.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            let key = normalize_key(key);
            let value = value.trim();

            if !indented && key == PACKAGE_NAME_KEY {
                if value.is_empty() {
                    return Err(Error::malformed(line_no, "empty package name"));
                }
                Ok(Line::Header {
                    name: value,
                    flat: true,
                })
            } else {
                Ok(Line::Field { key, value })
            }
        }
        _ if indented => Err(Error::malformed(
            line_no,
            format!("expected 'KEY: VALUE', found '{}'", trimmed),
        )),
        Some(_) => Err(Error::malformed(
            line_no,
            format!("missing key before ':' in '{}'", trimmed),
        )),
        None => Ok(Line::Header {
            name: trimmed,
            flat: false,
        }),
    }
}

/// Uppercase a key and collapse internal runs of whitespace
fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Record under construction, plus what the strict check needs
struct Stanza {
    record: PackageRecord,
    line: usize,
    seen: Vec<ManifestField>,
}

impl Stanza {
    fn new(name: &str, line: usize) -> Self {
        Self {
            record: PackageRecord::new(name),
            line,
            seen: Vec::new(),
        }
    }

    fn set(&mut self, field: ManifestField, value: &str) {
        field.assign(&mut self.record, value);
        if !self.seen.contains(&field) {
            self.seen.push(field);
        }
    }

    fn flush(self, set: &mut ManifestSet, options: ParseOptions) -> Result<()> {
        if options.strict {
            if let Some(missing) = ManifestField::REQUIRED
                .iter()
                .find(|f| !self.seen.contains(f))
            {
                return Err(Error::malformed(
                    self.line,
                    format!(
                        "package '{}' is missing the '{}' field",
                        self.record.name,
                        missing.key()
                    ),
                ));
            }
        }

        set.insert(self.record);
        Ok(())
    }
}
