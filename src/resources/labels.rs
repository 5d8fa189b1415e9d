//! Label source reading.
//!
//! The label source is the training label table: one row per training
//! example, with the species name in a named column. Only the distinct
//! names matter here.

use crate::error::{Error, Result};
use crate::resources::SpeciesIndex;
use std::path::Path;

/// Build the species index from a CSV label source.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read or is not valid CSV
/// - The header has no `column`
/// - No row carries a species name
pub fn read_species_index(path: &Path, column: &str) -> Result<SpeciesIndex> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let headers = reader.headers().map_err(|e| Error::LabelsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Tolerate a UTF-8 BOM in front of the first header.
    let position = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{FEFF}') == column)
        .ok_or_else(|| Error::InvalidLabels {
            path: path.to_path_buf(),
            message: format!("missing column '{column}'"),
        })?;

    let mut names = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        if let Some(name) = record.get(position).filter(|n| !n.is_empty()) {
            names.push(name.to_string());
        }
    }

    let index = SpeciesIndex::from_names(names);
    if index.is_empty() {
        return Err(Error::InvalidLabels {
            path: path.to_path_buf(),
            message: "no species names found".to_string(),
        });
    }

    Ok(index)
}
