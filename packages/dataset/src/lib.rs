#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Complaint dataset loading and validation.
//!
//! The dataset is a JSON array of complaint records, loaded exactly once
//! at startup and never mutated afterwards. A snapshot ships compiled
//! into the binary ([`bundled`]); [`load_from_path`] reads the same
//! format from disk for newer exports. Both paths enforce the
//! unique-`id` invariant the rest of the system relies on for row keys
//! and detail lookup.

use std::collections::BTreeSet;
use std::path::Path;

use complaint_map_complaint_models::ComplaintRecord;
use thiserror::Error;

/// Snapshot of the complaints export shipped with the binary.
const BUNDLED_JSON: &str = include_str!("../data/complaints.json");

/// Errors that can occur while loading a complaint dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading the dataset file failed.
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not a valid JSON array of complaint records.
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share the same id.
    #[error("Duplicate complaint id {id} in dataset")]
    DuplicateId {
        /// The id that appeared more than once.
        id: u64,
    },
}

/// Parses and validates the dataset bundled into the binary.
///
/// # Errors
///
/// Returns an error if the bundled JSON fails to parse or violates the
/// unique-id invariant. Either means a broken build artifact rather
/// than bad user input.
pub fn bundled() -> Result<Vec<ComplaintRecord>, DatasetError> {
    let records = parse(BUNDLED_JSON)?;
    log::info!("Loaded {} complaints from bundled dataset", records.len());
    Ok(records)
}

/// Reads, parses, and validates a dataset file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a JSON array of
/// complaint records, or contains duplicate ids.
pub fn load_from_path(path: &Path) -> Result<Vec<ComplaintRecord>, DatasetError> {
    let raw = std::fs::read_to_string(path)?;
    let records = parse(&raw)?;
    log::info!(
        "Loaded {} complaints from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

fn parse(raw: &str) -> Result<Vec<ComplaintRecord>, DatasetError> {
    let records: Vec<ComplaintRecord> = serde_json::from_str(raw)?;
    validate_unique_ids(&records)?;
    Ok(records)
}

fn validate_unique_ids(records: &[ComplaintRecord]) -> Result<(), DatasetError> {
    let mut seen = BTreeSet::new();
    for record in records {
        if !seen.insert(record.id) {
            return Err(DatasetError::DuplicateId { id: record.id });
        }
    }
    Ok(())
}
