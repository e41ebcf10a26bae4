//! CSV ingest collaborator.
//!
//! Decodes raw census lines into [`TreeRecord`]s and streams whole files
//! into a [`TreeCollection`]. This module is the only producer of
//! [`ArborError::MalformedRecord`] and performs the repository's only I/O;
//! the core index never sees raw text.

use crate::core::census::TreeCollection;
use crate::core::common::ArborError;
use crate::core::config::Config;
use crate::core::types::{Borough, HealthRating, LifeStatus, TreeRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of physical columns in one census line.
pub const FIELD_COUNT: usize = 41;

/// Fixed positions of the ten semantic fields within the 41 columns.
pub const COL_ID: usize = 0;
pub const COL_DIAMETER: usize = 1;
pub const COL_STATUS: usize = 6;
pub const COL_HEALTH: usize = 7;
pub const COL_SPECIES: usize = 10;
pub const COL_ADDRESS: usize = 26;
pub const COL_BOROUGH: usize = 27;
pub const COL_ZIP: usize = 28;
pub const COL_LATITUDE: usize = 39;
pub const COL_LONGITUDE: usize = 40;

/// Counters reported by the bulk loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data lines examined (header and blank lines excluded).
    pub scanned: usize,
    /// Records newly accepted into the collection.
    pub loaded: usize,
    /// Well-formed records dropped as duplicates of stored ones.
    pub duplicates: usize,
    /// Malformed lines skipped (lenient mode only).
    pub skipped: usize,
}

fn malformed(line: &str, reason: impl Into<String>) -> ArborError {
    ArborError::MalformedRecord { line: line.to_string(), reason: reason.into() }
}

/// Decodes and validates one raw census line into a fully-populated record.
///
/// # Errors
///
/// Returns [`ArborError::MalformedRecord`] when the line does not carry 41
/// columns or any semantic field fails validation: id and diameter must be
/// non-negative integers, status and health must be the documented literals
/// or blank, the species name must be non-empty and not purely numeric, the
/// address non-empty, the borough one of the five, the zip exactly five
/// digits, and latitude/longitude finite floats.
pub fn parse_record_line(line: &str) -> Result<TreeRecord, ArborError> {
    let columns: Vec<&str> = line.split(',').collect();
    if columns.len() != FIELD_COUNT {
        return Err(malformed(
            line,
            format!("expected {FIELD_COUNT} columns, got {}", columns.len()),
        ));
    }

    let id: u32 = columns[COL_ID]
        .trim()
        .parse()
        .map_err(|_| malformed(line, format!("invalid tree id '{}'", columns[COL_ID])))?;
    let diameter: u32 = columns[COL_DIAMETER]
        .trim()
        .parse()
        .map_err(|_| malformed(line, format!("invalid diameter '{}'", columns[COL_DIAMETER])))?;

    let status = LifeStatus::parse(columns[COL_STATUS])
        .ok_or_else(|| malformed(line, format!("invalid status '{}'", columns[COL_STATUS])))?;
    let health = HealthRating::parse(columns[COL_HEALTH])
        .ok_or_else(|| malformed(line, format!("invalid health '{}'", columns[COL_HEALTH])))?;

    let species = columns[COL_SPECIES].trim();
    if species.is_empty() || species.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed(line, format!("invalid species name '{species}'")));
    }

    let address = columns[COL_ADDRESS].trim();
    if address.is_empty() {
        return Err(malformed(line, "empty address"));
    }

    let borough = Borough::parse(columns[COL_BOROUGH]);
    if borough == Borough::Unknown {
        return Err(malformed(line, format!("unknown borough '{}'", columns[COL_BOROUGH])));
    }

    let zip_field = columns[COL_ZIP].trim();
    if zip_field.len() != 5 || !zip_field.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed(line, format!("invalid zip code '{zip_field}'")));
    }
    let zipcode: u32 = zip_field
        .parse()
        .map_err(|_| malformed(line, format!("invalid zip code '{zip_field}'")))?;

    let latitude: f64 = columns[COL_LATITUDE]
        .trim()
        .parse()
        .map_err(|_| malformed(line, format!("invalid latitude '{}'", columns[COL_LATITUDE])))?;
    let longitude: f64 = columns[COL_LONGITUDE]
        .trim()
        .parse()
        .map_err(|_| malformed(line, format!("invalid longitude '{}'", columns[COL_LONGITUDE])))?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(malformed(line, "non-finite coordinates"));
    }

    Ok(TreeRecord::new(
        id, diameter, status, health, species, borough, zipcode, address, latitude, longitude,
    ))
}

/// Decode-and-validate that never fails: a malformed line yields the
/// canonical empty sentinel instead of an error.
#[must_use]
pub fn record_or_empty(line: &str) -> TreeRecord {
    parse_record_line(line).unwrap_or_else(|_| TreeRecord::sentinel())
}

/// Streams census lines from `reader` into `collection`.
///
/// The first line is skipped when `config.has_header` is set; blank lines
/// are ignored. Malformed lines abort the load in strict mode and are
/// counted and logged as warnings otherwise.
///
/// # Errors
///
/// Returns the underlying I/O error, or the first
/// [`ArborError::MalformedRecord`] when `config.strict_ingest` is set.
pub fn load_census_csv<R: BufRead>(
    reader: R,
    collection: &mut TreeCollection,
    config: &Config,
) -> Result<LoadStats, ArborError> {
    let mut stats = LoadStats::default();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if config.has_header && number == 0 {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        stats.scanned += 1;
        match parse_record_line(&line) {
            Ok(record) => {
                if collection.add_tree(record) {
                    stats.loaded += 1;
                } else {
                    stats.duplicates += 1;
                }
            }
            Err(err) if config.strict_ingest => return Err(err),
            Err(err) => {
                log::warn!("skipping line {}: {err}", number + 1);
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

/// Opens `path` and loads it with [`load_census_csv`].
///
/// # Errors
///
/// Returns [`ArborError::Io`] when the file cannot be opened, plus every
/// error [`load_census_csv`] can produce.
pub fn load_census_file(
    path: impl AsRef<Path>,
    collection: &mut TreeCollection,
    config: &Config,
) -> Result<LoadStats, ArborError> {
    let file = File::open(path.as_ref())?;
    load_census_csv(BufReader::new(file), collection, config)
}
