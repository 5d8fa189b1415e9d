//! Process-lifetime resources: model, species index and reference tables.
//!
//! Everything here is loaded once at startup and read-only afterwards, so a
//! single [`Resources`] handle can be shared by every request.

mod labels;
mod species_index;
mod tables;

pub use labels::read_species_index;
pub use species_index::SpeciesIndex;
pub use tables::{ConservationStatus, ConservationTable, Coordinates, HabitatTable, ReferenceTables};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::inference::{ButterflyModel, OnnxClassifier, PredictionResult, predict};
use image::DynamicImage;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Loaded model, species index and reference tables.
pub struct Resources {
    model: Box<dyn ButterflyModel>,
    species: SpeciesIndex,
    tables: ReferenceTables,
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("species", &self.species.len())
            .field("conservation", &self.tables.conservation.len())
            .field("habitat", &self.tables.habitat.len())
            .finish_non_exhaustive()
    }
}

impl Resources {
    /// Assemble resources from already-loaded parts.
    ///
    /// Fails if the model declares a species head whose width differs from
    /// the species index.
    pub fn new(
        model: Box<dyn ButterflyModel>,
        species: SpeciesIndex,
        tables: ReferenceTables,
    ) -> Result<Self> {
        if let Some(model_classes) = model.species_classes()
            && model_classes != species.len()
        {
            return Err(Error::ModelLabelMismatch {
                model_classes,
                label_classes: species.len(),
            });
        }

        Ok(Self {
            model,
            species,
            tables,
        })
    }

    /// Load everything named by the configuration.
    pub fn load(config: &Config) -> Result<Self> {
        info!("Loading labels: {}", config.model.labels.display());
        let species = read_species_index(&config.model.labels, &config.model.label_column)?;
        info!("Species index: {} species", species.len());

        let tables = ReferenceTables::load(&config.tables)?;
        info!(
            "Reference tables: {} conservation entries, {} habitat entries",
            tables.conservation.len(),
            tables.habitat.len()
        );

        info!("Loading model: {}", config.model.path.display());
        let model = OnnxClassifier::load(&config.model.path)?;

        Self::new(Box::new(model), species, tables)
    }

    /// Species index.
    pub fn species(&self) -> &SpeciesIndex {
        &self.species
    }

    /// Reference tables.
    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Classify an image with the loaded model.
    pub fn predict(&self, image: &DynamicImage) -> Result<PredictionResult> {
        predict(self.model.as_ref(), &self.species, image)
    }
}

/// Lazily loads [`Resources`] once and hands out the cached handle.
#[derive(Debug)]
pub struct ResourceStore {
    config: Config,
    cell: OnceLock<Arc<Resources>>,
}

impl ResourceStore {
    /// Create a store that will load from `config` on first use.
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
        }
    }

    /// Create a store around resources that are already loaded.
    pub fn with_resources(config: Config, resources: Resources) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Arc::new(resources));
        Self { config, cell }
    }

    /// Load resources on the first call; return the cached handle afterwards.
    ///
    /// A failed load is not cached, so a later call retries.
    pub fn load(&self) -> Result<Arc<Resources>> {
        if let Some(resources) = self.cell.get() {
            return Ok(Arc::clone(resources));
        }

        let loaded = Arc::new(Resources::load(&self.config)?);
        // Another thread may have won the race; keep whichever landed first.
        let _ = self.cell.set(loaded);
        self.cell.get().cloned().ok_or_else(|| Error::Internal {
            message: "resource cache empty after initialization".to_string(),
        })
    }

    /// Whether resources have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
