//! Report types shared by the text and JSON writers.

use crate::enrichment::Enrichment;
use crate::inference::PredictionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trait notices derived from the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitFlags {
    /// Mimic probability is above the threshold.
    pub likely_mimic: bool,
    /// Model-species probability is above the threshold.
    pub likely_model: bool,
}

impl From<&PredictionResult> for TraitFlags {
    fn from(prediction: &PredictionResult) -> Self {
        Self {
            likely_mimic: prediction.is_likely_mimic(),
            likely_model: prediction.is_likely_model(),
        }
    }
}

/// Full analysis of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Source image file name.
    pub source_file: String,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Model prediction.
    pub prediction: PredictionResult,
    /// Trait notices.
    pub traits: TraitFlags,
    /// Species enrichment.
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

impl AnalysisReport {
    /// Build a report stamped with the current time.
    pub fn new(source: &Path, prediction: PredictionResult, enrichment: Enrichment) -> Self {
        let source_file = source.file_name().map_or_else(
            || source.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        );
        Self {
            source_file,
            analysis_date: Utc::now(),
            traits: TraitFlags::from(&prediction),
            prediction,
            enrichment,
        }
    }
}

/// Enrichment for a species name looked up directly, without an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesReport {
    /// Species name as given.
    pub species: String,
    /// Whether the name is in the classifier's species index, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_index: Option<bool>,
    /// Species enrichment.
    #[serde(flatten)]
    pub enrichment: Enrichment,
}
