//! Conservation status and habitat reference tables.
//!
//! Both tables ship with the binary and can be replaced by JSON files named
//! in the configuration. Keys are species display names and must match the
//! label source exactly.

use crate::config::TablesConfig;
use crate::constants::map;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const BUNDLED_CONSERVATION: &str = include_str!("../../data/conservation.json");
const BUNDLED_HABITAT: &str = include_str!("../../data/habitat.json");

/// Conservation status of a species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConservationStatus {
    /// Endangered.
    Endangered,
    /// Near threatened.
    #[serde(rename = "Near Threatened")]
    NearThreatened,
    /// Least concern.
    #[serde(rename = "Least Concern")]
    LeastConcern,
    /// No assessment available.
    #[default]
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl ConservationStatus {
    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Endangered => "Endangered",
            Self::NearThreatened => "Near Threatened",
            Self::LeastConcern => "Least Concern",
            Self::NotAvailable => "Not Available",
        }
    }

    /// Indicator symbol shown next to the label.
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Endangered => "🔴",
            Self::NearThreatened => "🟡",
            Self::LeastConcern => "🟢",
            Self::NotAvailable => "❓",
        }
    }
}

impl std::fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.indicator())
    }
}

/// Approximate habitat location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Map link with a marker at this location.
    pub fn map_url(&self) -> String {
        format!(
            "{}?mlat={lat:.4}&mlon={lon:.4}#map={zoom}/{lat:.4}/{lon:.4}",
            map::BASE_URL,
            lat = self.latitude,
            lon = self.longitude,
            zoom = map::ZOOM,
        )
    }
}

/// Species name to conservation status.
#[derive(Debug, Clone, Default)]
pub struct ConservationTable {
    entries: HashMap<String, ConservationStatus>,
}

impl ConservationTable {
    /// Parse a table from JSON of the form `{"Monarch": "Endangered", ...}`.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        let entries = serde_json::from_str(json).map_err(|e| Error::TableParse {
            table: "conservation",
            path: origin.to_path_buf(),
            source: e,
        })?;
        Ok(Self { entries })
    }

    /// Status for a species, or [`ConservationStatus::NotAvailable`].
    pub fn status(&self, species: &str) -> ConservationStatus {
        self.entries.get(species).copied().unwrap_or_default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Species name to approximate habitat location.
#[derive(Debug, Clone, Default)]
pub struct HabitatTable {
    entries: HashMap<String, Coordinates>,
}

impl HabitatTable {
    /// Parse a table from JSON of the form `{"Monarch": [37.09, -95.71], ...}`.
    ///
    /// Coordinates outside the valid latitude/longitude ranges are rejected.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        let raw: HashMap<String, [f64; 2]> =
            serde_json::from_str(json).map_err(|e| Error::TableParse {
                table: "habitat",
                path: origin.to_path_buf(),
                source: e,
            })?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (species, [latitude, longitude]) in raw {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(Error::InvalidLatitude {
                    species,
                    value: latitude,
                });
            }
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(Error::InvalidLongitude {
                    species,
                    value: longitude,
                });
            }
            entries.insert(
                species,
                Coordinates {
                    latitude,
                    longitude,
                },
            );
        }

        Ok(Self { entries })
    }

    /// Habitat location for a species, if known.
    pub fn location(&self, species: &str) -> Option<Coordinates> {
        self.entries.get(species).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both reference tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    /// Conservation status table.
    pub conservation: ConservationTable,
    /// Habitat location table.
    pub habitat: HabitatTable,
}

impl ReferenceTables {
    /// Tables compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::load(&TablesConfig::default())
    }

    /// Load tables, preferring configured files over the bundled data.
    pub fn load(config: &TablesConfig) -> Result<Self> {
        let conservation = match &config.conservation {
            Some(path) => {
                debug!("Loading conservation table: {}", path.display());
                ConservationTable::from_json(&read_table("conservation", path)?, path)?
            }
            None => ConservationTable::from_json(
                BUNDLED_CONSERVATION,
                Path::new("bundled://conservation.json"),
            )?,
        };

        let habitat = match &config.habitat {
            Some(path) => {
                debug!("Loading habitat table: {}", path.display());
                HabitatTable::from_json(&read_table("habitat", path)?, path)?
            }
            None => HabitatTable::from_json(BUNDLED_HABITAT, Path::new("bundled://habitat.json"))?,
        };

        Ok(Self {
            conservation,
            habitat,
        })
    }
}

fn read_table(table: &'static str, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::TableRead {
        table,
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_bundled_monarch() {
        let tables = ReferenceTables::bundled().unwrap();

        let status = tables.conservation.status("Monarch");
        assert_eq!(status, ConservationStatus::Endangered);
        assert_eq!(status.label(), "Endangered");
        assert_eq!(status.indicator(), "🔴");

        let location = tables.habitat.location("Monarch").unwrap();
        assert_close(location.latitude, 37.09);
        assert_close(location.longitude, -95.71);
    }

    #[test]
    fn test_bundled_skipper() {
        let tables = ReferenceTables::bundled().unwrap();

        let status = tables.conservation.status("Skipper");
        assert_eq!(status.label(), "Not Available");
        assert_eq!(status.indicator(), "❓");

        let location = tables.habitat.location("Skipper").unwrap();
        assert_close(location.latitude, 39.83);
        assert_close(location.longitude, -98.58);
    }

    #[test]
    fn test_unknown_species_sentinels() {
        let tables = ReferenceTables::bundled().unwrap();

        assert_eq!(
            tables.conservation.status("Atlas Moth"),
            ConservationStatus::NotAvailable
        );
        assert!(tables.habitat.location("Atlas Moth").is_none());
        // Lookups are exact.
        assert!(tables.habitat.location("monarch").is_none());
    }

    #[test]
    fn test_bundled_table_sizes() {
        let tables = ReferenceTables::bundled().unwrap();
        assert_eq!(tables.conservation.len(), 53);
        assert_eq!(tables.habitat.len(), 53);
        assert_eq!(
            tables.conservation.status("Black Hairstreak"),
            ConservationStatus::NearThreatened
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ConservationStatus::LeastConcern.to_string(), "Least Concern 🟢");
    }

    #[test]
    fn test_unknown_status_label_rejected() {
        let result =
            ConservationTable::from_json(r#"{"Monarch": "Extinct"}"#, Path::new("test.json"));
        assert!(matches!(result, Err(Error::TableParse { .. })));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let result = HabitatTable::from_json(r#"{"Monarch": [97.0, 10.0]}"#, Path::new("t.json"));
        assert!(matches!(result, Err(Error::InvalidLatitude { .. })));

        let result = HabitatTable::from_json(r#"{"Monarch": [37.0, 190.0]}"#, Path::new("t.json"));
        assert!(matches!(result, Err(Error::InvalidLongitude { .. })));
    }

    #[test]
    fn test_load_override_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, r#"{{"Atlas Moth": [1.35, 103.82]}}"#).unwrap();
        file.flush().unwrap();

        let config = TablesConfig {
            conservation: None,
            habitat: Some(file.path().to_path_buf()),
        };
        let tables = ReferenceTables::load(&config).unwrap();

        assert!(tables.habitat.location("Atlas Moth").is_some());
        assert!(tables.habitat.location("Monarch").is_none());
        assert_eq!(
            tables.conservation.status("Monarch"),
            ConservationStatus::Endangered
        );
    }

    #[test]
    fn test_load_missing_override_is_error() {
        let config = TablesConfig {
            conservation: Some(PathBuf::from("/nonexistent/conservation.json")),
            habitat: None,
        };
        let result = ReferenceTables::load(&config);
        assert!(matches!(result, Err(Error::TableRead { .. })));
    }

    #[test]
    fn test_map_url() {
        let coordinates = Coordinates {
            latitude: 37.0902,
            longitude: -95.7129,
        };
        assert_eq!(
            coordinates.map_url(),
            "https://www.openstreetmap.org/?mlat=37.0902&mlon=-95.7129#map=4/37.0902/-95.7129"
        );
    }
}
